use mpd_parser::prelude::*;

use crate::AssertWrapper;

fn big_buck_bunny() -> Mpd {
    Parser::from_string(include_str!("../fixtures/big-buck-bunny.mpd")).assert_success()
}

#[test]
fn test_assign_and_render() -> MpdResult<()> {
    let mpd = big_buck_bunny();

    mpd.set_min_buffer_time(Some("PT4S"));
    assert_eq!(mpd.min_buffer_time().as_deref(), Some("PT4S"));
    assert_eq!(mpd.min_buffer_time_in_seconds()?, Some(4.0));

    let info = &mpd.program_informations()[0];
    info.set_more_info_url(Some("https://peach.blender.org"));
    info.set_lang(None);
    info.titles()[0].set_text(Some("Sintel"));

    let rendered = Parser::to_string(&mpd)?;
    assert!(rendered.contains(r#"minBufferTime="PT4S""#));
    assert!(rendered.contains(r#"<ProgramInformation moreInformationURL="https://peach.blender.org">"#));
    assert!(rendered.contains("<Title>Sintel</Title>"));
    assert!(!rendered.contains("Big Buck Bunny"));

    Ok(())
}

#[test]
fn test_unknown_property() {
    let mpd = big_buck_bunny();
    let period = &mpd.periods()[0];

    assert_eq!(period.property("new_attribute"), None);
    period.set_property("new_attribute", Some("value"));
    assert_eq!(period.property("new_attribute").as_deref(), Some("value"));
    assert!(period
        .to_xml()
        .assert_success()
        .starts_with(r#"<Period id="p0" duration="PT0H1M0.00S" newAttribute="value">"#));
}

#[test]
fn test_wrappers_share_the_document() -> MpdResult<()> {
    let mpd = big_buck_bunny();
    let period = mpd.periods()[0].clone();
    assert_eq!(period.duration_in_seconds()?, 60.0);

    // a second wrapper over the same element
    let other = Period::from_node(Node::new(
        mpd.node().document().clone(),
        period.node().id(),
    ));
    other.set_duration(Some("PT30S"));

    // the document changed, `period` still serves what it read before
    assert!(Parser::to_string(&mpd)?.contains(r#"<Period id="p0" duration="PT30S">"#));
    assert_eq!(period.duration().as_deref(), Some("PT0H1M0.00S"));
    assert_eq!(period.duration_in_seconds()?, 60.0);
    assert_eq!(other.duration_in_seconds()?, 30.0);

    period.node().invalidate();
    assert_eq!(period.duration_in_seconds()?, 30.0);

    Ok(())
}

#[test]
fn test_list_assignment() -> MpdResult<()> {
    let mpd = big_buck_bunny();
    let subset = mpd.periods()[0].subsets()[0].clone();
    assert_eq!(subset.contains()?, vec![1, 2]);

    subset.set_contains(vec![1, 2, 3]);
    assert_eq!(subset.node().attribute("contains").as_deref(), Some("1,2,3"));
    assert_eq!(subset.contains()?, vec![1, 2, 3]);

    subset.set_contains(Vec::new());
    assert_eq!(subset.node().attribute("contains"), None);
    assert!(subset.contains()?.is_empty());

    Ok(())
}

#[test]
fn test_malformed_number() -> MpdResult<()> {
    let mpd = big_buck_bunny();
    let representation = mpd.periods()[0].adaptation_sets()[0].representations()[0].clone();

    representation.set_property("bandwidth", Some("fast"));
    assert!(matches!(
        representation.bandwidth(),
        Err(MpdError::MalformedNumber(_))
    ));

    representation.set_bandwidth(Some(5000000));
    assert_eq!(representation.bandwidth()?, Some(5000000));

    Ok(())
}

#[test]
fn test_append_children() -> MpdResult<()> {
    let mpd = big_buck_bunny();
    let period = mpd.periods()[0].clone();
    assert_eq!(period.adaptation_sets().len(), 2);

    let text = AdaptationSet::from_node(period.node().append_child("AdaptationSet"));
    text.set_content_type(Some("text"));
    text.set_lang(Some("ja"));

    let adaptation_sets = period.adaptation_sets();
    assert_eq!(adaptation_sets.len(), 3);
    assert_eq!(adaptation_sets[2].lang().as_deref(), Some("ja"));
    assert!(Parser::to_string(&mpd)?.contains(r#"<AdaptationSet contentType="text" lang="ja"/>"#));

    assert!(adaptation_sets[0].node().detach());
    assert_eq!(period.adaptation_sets().len(), 2);

    Ok(())
}
