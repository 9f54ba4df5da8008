//! Segment timing derived from a `SegmentTemplate` and the period and manifest around it.
//!
//! References:
//! - [DASH-IF implementation guidelines: restricted timing model](https://dashif.org/Guidelines-TimingModel)
//! - ISO/IEC 23009-1, 5.3.9.6 (SegmentTimeline)

use serde::Serialize;

use crate::{
    error::{MpdError, MpdResult},
    node::Tag,
    tags::{Mpd, MultipleSegmentBaseAttributes, Period, SegmentBaseAttributes, SegmentTemplate},
};

/// Position of one media segment on the presentation timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentTiming {
    /// Seconds from the start of the presentation.
    pub start_time: f64,
    /// Seconds.
    pub duration: f64,
    /// Sequence number, substituted for `$Number$`.
    pub number: u64,
    /// Start in timescale units, substituted for `$Time$`.
    pub time: u64,
    /// Seconds since the Unix epoch. Only set when the manifest has an `availabilityStartTime`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_start: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_end: Option<f64>,
}

impl SegmentTiming {
    fn new(start_time: f64, duration: f64, number: u64, time: u64) -> Self {
        Self {
            start_time,
            duration,
            number,
            time,
            availability_start: None,
            availability_end: None,
        }
    }

    fn available_from(mut self, availability_start_time: Option<f64>) -> Self {
        if let Some(availability_start_time) = availability_start_time {
            let start = availability_start_time + self.start_time;
            self.availability_start = Some(start);
            self.availability_end = Some(start + self.duration);
        }
        self
    }
}

/// How the number of segments is bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimingMode {
    /// The enclosing period has a duration.
    OnDemand,
    /// The manifest declares both `availabilityStartTime` and `timeShiftBufferDepth`.
    Live,
    /// Everything else, bounded by `minimumUpdatePeriod`.
    Dynamic,
}

impl SegmentTemplate {
    /// The closest `Period` around this template.
    pub fn enclosing_period(&self) -> MpdResult<Period> {
        self.node().require_ancestor("Period").map(Period::from_node)
    }

    /// The `MPD` this template belongs to.
    pub fn manifest(&self) -> MpdResult<Mpd> {
        self.node().require_ancestor("MPD").map(Mpd::from_node)
    }

    /// Segments described by `duration` and `timescale`.
    ///
    /// The result is empty if either attribute is missing or zero, or if neither a period nor a
    /// manifest bounds the number of segments. Not memoized: the result depends on attributes
    /// of the enclosing period and manifest.
    pub fn segment_timings(&self) -> MpdResult<Vec<SegmentTiming>> {
        let duration = self.duration()?.filter(|duration| *duration > 0);
        let timescale = self.timescale()?.filter(|timescale| *timescale > 0);
        let (Some(duration), Some(timescale)) = (duration, timescale) else {
            log::debug!("SegmentTemplate has no duration or timescale, no segment timings");
            return Ok(Vec::new());
        };

        let segment_duration = duration as f64 / timescale as f64;
        let start_number = self.start_number()?.unwrap_or(1);
        let presentation_time_offset = self.presentation_time_offset()?.unwrap_or(0);

        let period = self.enclosing_period().ok();
        let manifest = self.manifest().ok();

        let period_duration = match &period {
            Some(period) => period.duration_in_seconds()?,
            None => 0.0,
        };
        let (mode, window) = match &manifest {
            _ if period_duration != 0.0 => (TimingMode::OnDemand, period_duration),
            Some(manifest) if is_set(manifest.availability_start_time())
                && is_set(manifest.time_shift_buffer_depth()) =>
            {
                (
                    TimingMode::Live,
                    manifest.time_shift_buffer_depth_in_seconds()?,
                )
            }
            Some(manifest) => (
                TimingMode::Dynamic,
                manifest.minimum_update_period_in_seconds()?,
            ),
            None => {
                log::warn!("SegmentTemplate has neither a timed Period nor an MPD around it");
                return Ok(Vec::new());
            }
        };

        let count = (window / segment_duration).floor();
        if !count.is_finite() || count < 1.0 {
            log::debug!("{mode:?} window of {window}s holds no {segment_duration}s segment");
            return Ok(Vec::new());
        }
        let count = count as u64;
        log::debug!("{mode:?} template: {count} segments of {segment_duration}s");

        // the last segment bounds every number and time below
        let last = count - 1;
        start_number
            .checked_add(last)
            .ok_or(MpdError::TimingOverflow("number"))?;
        duration
            .checked_mul(last)
            .and_then(|offset| offset.checked_add(presentation_time_offset))
            .ok_or(MpdError::TimingOverflow("time"))?;

        let start_time = match &period {
            Some(period) => period.start_in_seconds()?,
            None => 0.0,
        };
        let availability_start_time = match &manifest {
            Some(manifest) => manifest.availability_start_time_in_seconds()?,
            None => None,
        };

        let timings = (0..count)
            .map(|index| {
                SegmentTiming::new(
                    start_time + index as f64 * segment_duration,
                    segment_duration,
                    start_number + index,
                    presentation_time_offset + index * duration,
                )
                .available_from(availability_start_time)
            })
            .collect();
        Ok(timings)
    }

    /// Segments listed by the first `SegmentTimeline` child. Empty without a timeline.
    ///
    /// A first `S` without `t` starts at media time 0.
    pub fn timeline_segment_timings(&self) -> MpdResult<Vec<SegmentTiming>> {
        let Some(timeline) = self.segment_timelines().into_iter().next() else {
            return Ok(Vec::new());
        };

        let timescale = self.timescale()?.filter(|timescale| *timescale > 0).unwrap_or(1);
        let presentation_time_offset = self.presentation_time_offset()?.unwrap_or(0);
        let start_number = self.start_number()?.unwrap_or(1);

        let period = self.enclosing_period().ok();
        let (period_start, period_duration) = match &period {
            Some(period) => (period.start_in_seconds()?, period.duration_in_seconds()?),
            None => (0.0, 0.0),
        };
        let period_end = (period_duration > 0.0)
            .then(|| (period_duration * timescale as f64).round() as u64)
            .and_then(|ticks| presentation_time_offset.checked_add(ticks));
        let availability_start_time = match self.manifest().ok() {
            Some(manifest) => manifest.availability_start_time_in_seconds()?,
            None => None,
        };

        let to_seconds = |ticks: f64| ticks / timescale as f64;
        let segments = timeline.segments();
        let mut timings = Vec::new();
        // where the next `S` without `t` starts, `None` once past `u64::MAX`
        let mut next_time = Some(0);

        for (index, segment) in segments.iter().enumerate() {
            if let Some(t) = segment.t()? {
                next_time = Some(t);
            }
            let Some(d) = segment.d()?.filter(|d| *d > 0) else {
                log::warn!("Skipping S element without a duration");
                continue;
            };
            let start = next_time.ok_or(MpdError::TimingOverflow("time"))?;

            let repeat = match segment.r()?.unwrap_or(0) {
                r if r >= 0 => r as u64,
                _ => {
                    let next_start = match segments.get(index + 1) {
                        Some(next) => next.t()?,
                        None => None,
                    };
                    match next_start.or(period_end) {
                        Some(end) if end > start => (end - start).div_ceil(d) - 1,
                        _ => 0,
                    }
                }
            };

            for repetition in 0..=repeat {
                let time = d
                    .checked_mul(repetition)
                    .and_then(|offset| start.checked_add(offset))
                    .ok_or(MpdError::TimingOverflow("time"))?;
                let number = start_number
                    .checked_add(timings.len() as u64)
                    .ok_or(MpdError::TimingOverflow("number"))?;
                let start_time =
                    period_start + to_seconds(time as f64 - presentation_time_offset as f64);
                timings.push(
                    SegmentTiming::new(start_time, to_seconds(d as f64), number, time)
                        .available_from(availability_start_time),
                );
            }
            next_time = d
                .checked_mul(repeat + 1)
                .and_then(|offset| start.checked_add(offset));
        }

        log::debug!("SegmentTimeline expanded to {} segments", timings.len());
        Ok(timings)
    }
}

/// Present and not empty.
fn is_set(value: Option<String>) -> bool {
    value.is_some_and(|value| !value.is_empty())
}
