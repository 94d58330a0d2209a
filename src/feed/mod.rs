mod generate;
mod latest;

pub use generate::{
    AUDIO_MIME_TYPE, build_channel, format_duration, format_pub_date, generate_feed,
    generate_feed_at,
};
pub use latest::{FUTURE_TOLERANCE_DAYS, latest_episode_date, latest_episode_date_at};
