table! {
    users (id) {
        id -> Int8,
        name -> Text,
        surname -> Text,
        email -> Text,
        username -> Text,
        password -> Text,
    }
}
