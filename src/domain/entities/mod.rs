pub mod signup_channel;
pub mod user_type;
pub mod waitlist_email;
pub mod waitlist_entry;
