use serde::{Deserialize, Serialize};

/// A closed interval between two timestamps in unix millis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSpan {
    start_ts: i64,
    end_ts: i64,
}

impl TimeSpan {
    pub fn new(start_ts: i64, end_ts: i64) -> Self {
        Self { start_ts, end_ts }
    }

    pub fn start(&self) -> i64 {
        self.start_ts
    }

    pub fn end(&self) -> i64 {
        self.end_ts
    }

    pub fn duration_millis(&self) -> i64 {
        self.end_ts - self.start_ts
    }

    pub fn contains(&self, ts: i64) -> bool {
        self.start_ts <= ts && ts <= self.end_ts
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn contains_is_inclusive_on_both_ends() {
        let span = TimeSpan::new(10, 20);
        assert!(span.contains(10));
        assert!(span.contains(15));
        assert!(span.contains(20));
        assert!(!span.contains(9));
        assert!(!span.contains(21));
    }
}
