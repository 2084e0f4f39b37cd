pub mod deck_session;
