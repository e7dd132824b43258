diesel::table! {
    exchanges (id) {
        id -> Integer,
        participant -> Text,
        prompt -> Text,
        response -> Text,
    }
}

diesel::table! {
    participants (participant) {
        participant -> Text,
        treatment -> Text,
    }
}
