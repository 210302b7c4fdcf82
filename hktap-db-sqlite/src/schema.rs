///////////////////////////////////////////////////////////////////////
// Locations
///////////////////////////////////////////////////////////////////////

table! {
    locations (rowid) {
        rowid -> BigInt,
        id -> Text,
        lat -> Double,
        lng -> Double,
        title -> Text,
        description -> Text,
        category -> Text,
        photo -> Nullable<Text>,
        votes -> BigInt,
        created_at -> BigInt,
    }
}
