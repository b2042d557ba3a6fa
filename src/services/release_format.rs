use serde::Serialize;

const TEN_MINUTES: i64 = 10 * 60;
const THIRTY_MINUTES: i64 = 30 * 60;

/// Store format of a release, following the distribution partner's rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReleaseFormat {
    Single,
    #[serde(rename = "EP")]
    Ep,
    Album,
}

impl ReleaseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseFormat::Single => "Single",
            ReleaseFormat::Ep => "EP",
            ReleaseFormat::Album => "Album",
        }
    }

    /// Classify a release from its track durations in seconds. Unknown
    /// durations count as zero.
    ///
    /// - Single: 1-3 tracks, each under 10 minutes, under 30 minutes total
    /// - EP: up to 6 tracks, under 30 minutes total
    /// - Album: everything else
    pub fn classify<I>(durations: I) -> Self
    where
        I: IntoIterator<Item = Option<i32>>,
    {
        let mut count = 0usize;
        let mut total = 0i64;
        let mut longest = 0i64;
        for duration in durations {
            let seconds = i64::from(duration.unwrap_or(0).max(0));
            count += 1;
            total += seconds;
            longest = longest.max(seconds);
        }

        if count <= 3 && longest < TEN_MINUTES && total < THIRTY_MINUTES {
            ReleaseFormat::Single
        } else if count <= 6 && total < THIRTY_MINUTES {
            ReleaseFormat::Ep
        } else {
            ReleaseFormat::Album
        }
    }
}

impl std::fmt::Display for ReleaseFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
