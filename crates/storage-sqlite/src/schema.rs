diesel::table! {
    users (id) {
        id -> Text,
        name -> Text,
        email -> Text,
        password_hash -> Text,
    }
}

diesel::table! {
    rates (id) {
        id -> Text,
        commodity -> Text,
        rate_per_gram -> Text,
        kind -> Text,
        recorded_at -> Text,
        rate_date -> Text,
        contributed_by -> Nullable<Text>,
    }
}

diesel::table! {
    investments (id) {
        id -> Text,
        commodity -> Text,
        weight_milligrams -> BigInt,
        buy_rate_per_gram -> Text,
        purchase_date -> Text,
        notes -> Nullable<Text>,
        owner_id -> Text,
    }
}

diesel::joinable!(investments -> users (owner_id));

diesel::allow_tables_to_appear_in_same_query!(investments, rates, users);
