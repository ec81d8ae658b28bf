// Database schema for the catalog
diesel::table! {
    users (id) {
        id -> Integer,
        name -> Text,
        surname -> Text,
        username -> Text,          // unique
        email -> Text,             // unique
        password_hash -> Text,     // argon2 PHC string
        national_id -> Text,       // unique, 13 characters
        created_at -> Timestamp,
    }
}

diesel::table! {
    items (id) {
        id -> Integer,
        owner_id -> Nullable<Integer>, // SET NULL when the owner is deleted
        name -> Text,
        price -> Double,
        description -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

diesel::table! {
    orders (id) {
        id -> Integer,
        item_id -> Nullable<Integer>,  // SET NULL when the item is deleted
        order_type -> Text,            // buy, sell
        price -> Double,
        crypto -> Text,                // ETH, BTC, SOL
        wallet -> Text,
        created_at -> Timestamp,
    }
}

diesel::joinable!(items -> users (owner_id));
diesel::joinable!(orders -> items (item_id));

diesel::allow_tables_to_appear_in_same_query!(users, items, orders,);
