//! Diesel table definitions mirroring `backend/migrations`.
//!
//! Keep these in step with the SQL; `diesel print-schema` against a migrated
//! database regenerates them.

diesel::table! {
    /// One row per signed-in user, keyed by their stable user id.
    profiles (user_id) {
        user_id -> Uuid,
        display_name -> Text,
        main_email -> Text,
        tee_shirt_size -> Text,
        conference_keys_to_attend -> Array<Uuid>,
        session_keys_in_wishlist -> Array<Uuid>,
    }
}

diesel::table! {
    conferences (id) {
        id -> Uuid,
        organizer_user_id -> Uuid,
        name -> Text,
        description -> Nullable<Text>,
        city -> Text,
        topics -> Array<Text>,
        start_date -> Nullable<Date>,
        end_date -> Nullable<Date>,
        /// Derived from `start_date`; zero when no start date is known.
        month -> Int4,
        max_attendees -> Int4,
        seats_available -> Int4,
    }
}

diesel::table! {
    sessions (id) {
        id -> Uuid,
        conference_id -> Uuid,
        name -> Text,
        highlights -> Text,
        speaker -> Text,
        duration -> Int4,
        type_of_session -> Text,
        date -> Nullable<Date>,
        start_time -> Nullable<Time>,
    }
}

diesel::joinable!(sessions -> conferences (conference_id));
diesel::allow_tables_to_appear_in_same_query!(conferences, profiles, sessions);
