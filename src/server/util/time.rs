use chrono::DateTime;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub(crate) mod helper {
    #[cfg(not(test))]
    pub use super::get_utc_now;
    #[cfg(test)]
    pub use super::mock_chrono::{get_utc_now, set_utc_now};

    /// Current UTC time in the format carried by orders.
    pub fn timestamp() -> String {
        get_utc_now().format(super::TIMESTAMP_FORMAT).to_string()
    }
}


#[cfg(not(test))]
pub fn get_utc_now() -> DateTime<chrono::Utc> {
    chrono::Utc::now()
}
