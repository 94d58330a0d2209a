// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use log::debug;

use crate::error::LatestEpisodeError;
use crate::series::Episode;

/// Episodes dated further ahead than this are treated as provisional
pub const FUTURE_TOLERANCE_DAYS: i64 = 7;

/// Display format, e.g. `Jan 2, 2006`
const LATEST_DATE_FORMAT: &str = "%b %-d, %Y";

/// Publication date of the most recent episode, formatted for display
///
/// Episodes with an unparseable date or one more than a week in the future
/// are ignored.
pub fn latest_episode_date(episodes: &[Episode]) -> Result<String, LatestEpisodeError> {
    latest_episode_date_at(episodes, Utc::now())
}

/// Same as [`latest_episode_date`], relative to `now`
pub fn latest_episode_date_at(
    episodes: &[Episode],
    now: DateTime<Utc>,
) -> Result<String, LatestEpisodeError> {
    if episodes.is_empty() {
        return Err(LatestEpisodeError::NoEpisodes);
    }

    let cutoff = now + TimeDelta::days(FUTURE_TOLERANCE_DAYS);

    episodes
        .iter()
        .filter_map(|episode| parse_date(episode))
        .filter(|date| *date <= cutoff)
        .max()
        .map(|date| date.format(LATEST_DATE_FORMAT).to_string())
        .ok_or(LatestEpisodeError::NoValidEpisodes)
}

fn parse_date(episode: &Episode) -> Option<DateTime<FixedOffset>> {
    match DateTime::parse_from_rfc3339(&episode.publication_date) {
        Ok(date) => Some(date),
        Err(e) => {
            debug!(
                "skipping episode '{}' with date '{}': {e}",
                episode.guid, episode.publication_date
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2024-06-01T00:00:00Z".parse().unwrap()
    }

    fn episodes(dates: &[&str]) -> Vec<Episode> {
        dates
            .iter()
            .enumerate()
            .map(|(i, date)| Episode {
                guid: format!("ep-{i}"),
                publication_date: date.to_string(),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn empty_list_has_no_episodes() {
        let err = latest_episode_date_at(&[], now()).unwrap_err();
        assert_eq!(err, LatestEpisodeError::NoEpisodes);
        assert_eq!(err.to_string(), "no episodes found");
    }

    #[test]
    fn picks_latest_and_skips_invalid() {
        let eps = episodes(&["2024-01-01T00:00:00Z", "2024-03-15T00:00:00Z", "invalid"]);
        assert_eq!(latest_episode_date_at(&eps, now()).unwrap(), "Mar 15, 2024");
    }

    #[test]
    fn order_of_input_does_not_matter() {
        let eps = episodes(&["2024-05-20T00:00:00Z", "2023-12-31T23:00:00Z", "2024-02-09T00:00:00Z"]);
        assert_eq!(latest_episode_date_at(&eps, now()).unwrap(), "May 20, 2024");
    }

    #[test]
    fn compares_instants_not_strings() {
        // Lexically larger but earlier in absolute time
        let eps = episodes(&["2024-03-15T10:00:00+09:00", "2024-03-15T02:00:00Z"]);
        assert_eq!(latest_episode_date_at(&eps, now()).unwrap(), "Mar 15, 2024");

        let eps = episodes(&["2024-03-16T01:00:00+09:00", "2024-03-15T20:00:00Z"]);
        assert_eq!(latest_episode_date_at(&eps, now()).unwrap(), "Mar 15, 2024");
    }

    #[test]
    fn excludes_episodes_far_in_the_future() {
        let eps = episodes(&["2024-05-01T00:00:00Z", "2024-12-24T00:00:00Z"]);
        assert_eq!(latest_episode_date_at(&eps, now()).unwrap(), "May 1, 2024");
    }

    #[test]
    fn keeps_episodes_within_a_week_ahead() {
        let eps = episodes(&["2024-05-01T00:00:00Z", "2024-06-08T00:00:00Z"]);
        assert_eq!(latest_episode_date_at(&eps, now()).unwrap(), "Jun 8, 2024");

        let eps = episodes(&["2024-05-01T00:00:00Z", "2024-06-08T00:00:01Z"]);
        assert_eq!(latest_episode_date_at(&eps, now()).unwrap(), "May 1, 2024");
    }

    #[test]
    fn all_filtered_has_no_valid_episodes() {
        let eps = episodes(&["invalid", "", "2030-01-01T00:00:00Z"]);
        let err = latest_episode_date_at(&eps, now()).unwrap_err();
        assert_eq!(err, LatestEpisodeError::NoValidEpisodes);
        assert_eq!(err.to_string(), "no valid episodes found");
    }

    #[test]
    fn day_is_not_padded() {
        let eps = episodes(&["2006-01-02T15:04:05-07:00"]);
        assert_eq!(latest_episode_date_at(&eps, now()).unwrap(), "Jan 2, 2006");
    }

    #[test]
    fn wall_clock_variant_accepts_past_dates() {
        let eps = episodes(&["2024-01-01T00:00:00Z", "2024-03-15T00:00:00Z", "invalid"]);
        assert_eq!(latest_episode_date(&eps).unwrap(), "Mar 15, 2024");
    }
}
