diesel::table! {
    expenses (id) {
        id -> Uuid,
        user_id -> Text,
        amount -> Numeric,
        category -> Text,
        description -> Nullable<Text>,
        date -> Date,
    }
}
