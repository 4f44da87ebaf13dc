mod time_utils;

pub use time_utils::{
    TimeUtils, epoch_ms_to_civil, localize, now_in, parse_with_fallback, utc_string_to_epoch_ms,
};
