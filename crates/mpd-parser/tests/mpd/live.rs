use mpd_parser::prelude::*;

use crate::{setup_logger, AssertWrapper};

// 2023-01-01T00:00:00Z
const AVAILABILITY_START: f64 = 1672531200.0;

fn live() -> Mpd {
    Parser::from_string(include_str!("../fixtures/live.mpd")).assert_success()
}

fn video_template(mpd: &Mpd) -> SegmentTemplate {
    mpd.periods()[0].adaptation_sets()[0].segment_templates()[0].clone()
}

#[test]
fn test_live_manifest() -> MpdResult<()> {
    let mpd = live();

    assert_eq!(mpd.encoding(), "utf-8");
    assert!(mpd.is_dynamic());
    assert_eq!(
        mpd.availability_start_time_in_seconds()?,
        Some(AVAILABILITY_START)
    );
    assert_eq!(mpd.time_shift_buffer_depth_in_seconds()?, 30.0);
    assert_eq!(mpd.minimum_update_period_in_seconds()?, 2.0);
    assert_eq!(mpd.media_presentation_duration_in_seconds()?, None);

    let timing = mpd.utc_timings().into_iter().next().assert_success();
    assert_eq!(
        timing.scheme_id_uri().as_deref(),
        Some("urn:mpeg:dash:utc:http-iso:2014")
    );
    assert_eq!(
        mpd.locations()[0].text().as_deref(),
        Some("https://live.example.com/channel/manifest.mpd")
    );

    Ok(())
}

#[test]
fn test_live_timings() -> MpdResult<()> {
    setup_logger();

    let mpd = live();
    let template = video_template(&mpd);
    let timings = template.segment_timings()?;

    // 30s buffer of 6s segments
    assert_eq!(timings.len(), 5);
    assert_eq!(timings[0].number, 100);
    assert_eq!(timings[4].number, 104);
    assert_eq!(timings[4].start_time, 24.0);
    assert_eq!(timings[4].time, 4 * 540000);
    assert_eq!(timings[0].availability_start, Some(AVAILABILITY_START));
    assert_eq!(timings[0].availability_end, Some(AVAILABILITY_START + 6.0));
    assert_eq!(timings[4].availability_end, Some(AVAILABILITY_START + 30.0));

    assert_eq!(
        template.media_url(&timings[2], Some("720p"), None).as_deref(),
        Some("720p/102.m4s")
    );

    Ok(())
}

#[test]
fn test_dynamic_fallback() -> MpdResult<()> {
    let mpd = live();
    mpd.set_time_shift_buffer_depth(None);
    mpd.set_minimum_update_period(Some("PT12S"));

    let timings = video_template(&mpd).segment_timings()?;
    assert_eq!(timings.len(), 2);
    assert_eq!(timings[1].number, 101);
    assert_eq!(timings[1].availability_start, Some(AVAILABILITY_START + 6.0));

    // the 2s default holds no 6s segment
    mpd.set_minimum_update_period(None);
    assert!(video_template(&mpd).segment_timings()?.is_empty());

    Ok(())
}

#[test]
fn test_period_duration_wins() -> MpdResult<()> {
    let mpd = live();
    mpd.periods()[0].set_duration(Some("PT12S"));

    let timings = video_template(&mpd).segment_timings()?;
    assert_eq!(timings.len(), 2);

    Ok(())
}

#[test]
fn test_malformed_depth() {
    let mpd = live();
    mpd.set_time_shift_buffer_depth(Some("thirty seconds"));

    video_template(&mpd).segment_timings().assert_error();
}
