mod fetch;
mod model;

pub use fetch::{DEFAULT_ENDPOINT, SeriesEndpoint, fetch_series, parse_series};
pub use model::{
    ApiResponse, AudioSample, AudioSlice, AvailabilityPeriod, Episode, Rankings, SeriesData,
};
