use mpd_parser::prelude::*;

use crate::{setup_logger, AssertWrapper};

fn big_buck_bunny() -> Mpd {
    Parser::from_string(include_str!("../fixtures/big-buck-bunny.mpd")).assert_success()
}

#[test]
fn test_manifest_attributes() -> MpdResult<()> {
    let mpd = big_buck_bunny();

    assert_eq!(mpd.encoding(), "UTF-8");
    assert!(mpd.is_static());
    assert_eq!(mpd.media_presentation_duration_in_seconds()?, Some(60.0));
    assert_eq!(mpd.min_buffer_time_in_seconds()?, Some(1.5));
    assert_eq!(mpd.availability_start_time_in_seconds()?, None);
    assert_eq!(mpd.xmlns().as_deref(), Some("urn:mpeg:dash:schema:mpd:2011"));
    assert_eq!(mpd.cenc().as_deref(), Some("urn:mpeg:cenc:2013"));

    let namespace = mpd.namespace();
    assert!(namespace.contains(&(
        "ns".to_string(),
        "urn:mpeg:dash:schema:mpd:2011".to_string()
    )));
    assert!(namespace.contains(&("cenc".to_string(), "urn:mpeg:cenc:2013".to_string())));

    let base_url = mpd.base_urls().into_iter().next().assert_success();
    assert_eq!(base_url.url().as_deref(), Some("https://cdn.example.com/bbb/"));

    Ok(())
}

#[test]
fn test_program_information() {
    let mpd = big_buck_bunny();
    let info = mpd.program_informations().into_iter().next().assert_success();

    assert_eq!(info.more_info_url().as_deref(), Some("http://gpac.io"));
    assert_eq!(info.lang().as_deref(), Some("en"));
    assert_eq!(info.titles()[0].text().as_deref(), Some("Big Buck Bunny"));
    assert_eq!(
        info.copyrights()[0].text().as_deref(),
        Some("Blender Foundation")
    );
    assert!(info.sources().is_empty());
}

#[test]
fn test_adaptation_sets() -> MpdResult<()> {
    let mpd = big_buck_bunny();
    let period = mpd.periods().into_iter().next().assert_success();
    assert_eq!(period.id().as_deref(), Some("p0"));
    assert_eq!(period.start_in_seconds()?, 0.0);
    assert_eq!(period.duration_in_seconds()?, 60.0);
    assert!(period.manifest()?.node().same_element(mpd.node()));

    let adaptation_sets = period.adaptation_sets();
    assert_eq!(adaptation_sets.len(), 2);

    let video = &adaptation_sets[0];
    assert_eq!(video.id()?, Some(1));
    assert_eq!(video.content_type().as_deref(), Some("video"));
    assert_eq!(video.mime_type().as_deref(), Some("video/mp4"));
    assert_eq!(video.segment_alignment(), Some(true));
    assert_eq!(video.start_with_sap()?, Some(1));
    assert_eq!(video.max_width()?, Some(1920));
    assert_eq!(video.par().as_deref(), Some("16:9"));

    let protection = video.content_protections().into_iter().next().assert_success();
    assert_eq!(protection.value().as_deref(), Some("cenc"));
    assert_eq!(
        protection.default_kid().as_deref(),
        Some("10000000-1000-1000-1000-100000000001")
    );

    let representations = video.representations();
    assert_eq!(representations.len(), 2);
    assert_eq!(representations[1].id().as_deref(), Some("v720"));
    assert_eq!(representations[1].bandwidth()?, Some(2400000));
    assert_eq!(representations[1].height()?, Some(720));
    assert_eq!(representations[1].frame_rate().as_deref(), Some("24"));

    let audio = &adaptation_sets[1];
    assert_eq!(audio.lang().as_deref(), Some("en"));
    assert_eq!(
        audio.audio_channel_configurations()[0].value().as_deref(),
        Some("2")
    );
    assert_eq!(audio.roles()[0].value().as_deref(), Some("main"));
    let representation = audio.representations().into_iter().next().assert_success();
    assert_eq!(
        representation.audio_sampling_rate().as_deref(),
        Some("48000")
    );
    assert_eq!(representation.codecs().as_deref(), Some("mp4a.40.2"));

    let subset = period.subsets().into_iter().next().assert_success();
    assert_eq!(subset.contains()?, vec![1, 2]);

    Ok(())
}

#[test]
fn test_template_timings() -> MpdResult<()> {
    setup_logger();

    let mpd = big_buck_bunny();
    let period = &mpd.periods()[0];
    let video = &period.adaptation_sets()[0];
    let template = video.segment_templates().into_iter().next().assert_success();

    let timings = template.segment_timings()?;
    assert_eq!(timings.len(), 15);
    assert_eq!(timings[0].start_time, 0.0);
    assert_eq!(timings[0].number, 1);
    assert_eq!(timings[14].start_time, 56.0);
    assert_eq!(timings[14].duration, 4.0);
    assert_eq!(timings[14].number, 15);
    assert_eq!(timings[14].time, 56000);
    assert!(timings.iter().all(|t| t.availability_start.is_none()));

    assert_eq!(
        template.initialization_url(Some("v720"), None).as_deref(),
        Some("v720/init.mp4")
    );
    assert_eq!(
        template.media_url(&timings[14], Some("v720"), None).as_deref(),
        Some("v720/seg-0015.m4s")
    );

    // no timeline on this template
    assert!(template.timeline_segment_timings()?.is_empty());

    Ok(())
}

#[test]
fn test_timeline_timings() -> MpdResult<()> {
    let mpd = big_buck_bunny();
    let audio = &mpd.periods()[0].adaptation_sets()[1];
    let representation = &audio.representations()[0];
    let template = representation.segment_templates().into_iter().next().assert_success();

    // `duration` is missing, only the timeline describes segments
    assert!(template.segment_timings()?.is_empty());

    let timings = template.timeline_segment_timings()?;
    assert_eq!(timings.len(), 15);
    assert_eq!(timings[13].start_time, 52.0);
    assert_eq!(timings[13].duration, 4.0);
    assert_eq!(timings[14].start_time, 56.0);
    assert_eq!(timings[14].duration, 2.0);
    assert_eq!(timings[14].time, 2688000);
    assert_eq!(
        template.media_url(&timings[14], representation.id().as_deref(), None).as_deref(),
        Some("a128/2688000.m4s")
    );

    Ok(())
}

#[test]
fn test_round_trip() {
    let source = include_str!("../fixtures/big-buck-bunny.mpd");
    let mpd = Parser::from_string(source).assert_success();
    let rendered = Parser::to_string(&mpd).assert_success();

    // the declaration is dropped on read
    let body = source.split_once("?>").assert_success().1;
    assert_eq!(rendered, body);
}
