// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    local_records (namespace, user_id) {
        namespace -> Text,
        user_id -> Text,
        record_json -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    local_users (namespace, user_id) {
        namespace -> Text,
        user_id -> Text,
        profile_json -> Text,
        updated_at -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(local_records, local_users);
