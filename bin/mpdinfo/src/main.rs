use mpd_parser::prelude::*;
use serde::Serialize;

#[derive(clap::Parser, Debug, Clone)]
#[clap(version, author)]
pub struct MpdInfoArgs {
    /// Debug output
    #[clap(long, alias = "debug")]
    verbose: bool,

    /// Print the segment timings of every SegmentTemplate
    #[clap(long)]
    timings: bool,

    /// Print segment timings as JSON, implies --timings
    #[clap(long)]
    json: bool,

    /// Print the manifest as it is held in memory
    #[clap(long)]
    dump: bool,

    /// Manifest file path or URL
    input: String,
}

impl MpdInfoArgs {
    async fn load(&self) -> anyhow::Result<Mpd> {
        let mpd = if self.input.starts_with("http://") || self.input.starts_with("https://") {
            let client = reqwest::Client::new();
            Parser::from_url(&client, &self.input).await?
        } else {
            Parser::from_file(&self.input)?
        };
        Ok(mpd)
    }
}

/// Timings of one SegmentTemplate together with where it was found.
#[derive(Serialize)]
struct TemplateTimings {
    period: Option<String>,
    adaptation_set: Option<u64>,
    representation: Option<String>,
    bandwidth: Option<u64>,
    segments: Vec<SegmentEntry>,
}

#[derive(Serialize)]
struct SegmentEntry {
    #[serde(flatten)]
    timing: SegmentTiming,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

impl TemplateTimings {
    fn new(
        template: &SegmentTemplate,
        period: &Period,
        adaptation_set: Option<&AdaptationSet>,
        representation: Option<&Representation>,
    ) -> MpdResult<Self> {
        let timings = if template.segment_timelines().is_empty() {
            template.segment_timings()?
        } else {
            template.timeline_segment_timings()?
        };

        let representation_id = representation.and_then(Representation::id);
        let bandwidth = match representation {
            Some(representation) => representation.bandwidth()?,
            None => None,
        };
        let segments = timings
            .into_iter()
            .map(|timing| SegmentEntry {
                url: template.media_url(&timing, representation_id.as_deref(), bandwidth),
                timing,
            })
            .collect();

        Ok(Self {
            period: period.id(),
            adaptation_set: match adaptation_set {
                Some(adaptation_set) => adaptation_set.id()?,
                None => None,
            },
            representation: representation_id,
            bandwidth,
            segments,
        })
    }
}

fn collect_timings(mpd: &Mpd) -> MpdResult<Vec<TemplateTimings>> {
    let mut result = Vec::new();
    for period in mpd.periods() {
        for template in period.segment_templates() {
            result.push(TemplateTimings::new(&template, &period, None, None)?);
        }
        for adaptation_set in period.adaptation_sets() {
            let representations = adaptation_set.representations();
            for template in adaptation_set.segment_templates() {
                if representations.is_empty() {
                    result.push(TemplateTimings::new(
                        &template,
                        &period,
                        Some(&adaptation_set),
                        None,
                    )?);
                }
                for representation in &representations {
                    result.push(TemplateTimings::new(
                        &template,
                        &period,
                        Some(&adaptation_set),
                        Some(representation),
                    )?);
                }
            }
            for representation in &representations {
                for template in representation.segment_templates() {
                    result.push(TemplateTimings::new(
                        &template,
                        &period,
                        Some(&adaptation_set),
                        Some(representation),
                    )?);
                }
            }
        }
    }
    Ok(result)
}

fn print_summary(mpd: &Mpd) -> MpdResult<()> {
    println!(
        "MPD type={} profiles={}",
        mpd.r#type().as_deref().unwrap_or("static"),
        mpd.profiles().as_deref().unwrap_or("-"),
    );
    if let Some(duration) = mpd.media_presentation_duration_in_seconds()? {
        println!("  duration: {duration}s");
    }
    if let Some(start) = mpd.availability_start_time() {
        println!("  availability start: {start}");
    }
    for info in mpd.program_informations() {
        for title in info.titles() {
            println!("  title: {}", title.text().unwrap_or_default());
        }
    }

    for period in mpd.periods() {
        println!(
            "Period {} start={}s duration={}s",
            period.id().as_deref().unwrap_or("-"),
            period.start_in_seconds()?,
            period.duration_in_seconds()?,
        );
        for adaptation_set in period.adaptation_sets() {
            println!(
                "  AdaptationSet {} {} lang={}",
                adaptation_set
                    .id()?
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                adaptation_set
                    .content_type()
                    .or_else(|| adaptation_set.mime_type())
                    .as_deref()
                    .unwrap_or("-"),
                adaptation_set.lang().as_deref().unwrap_or("-"),
            );
            for representation in adaptation_set.representations() {
                println!(
                    "    Representation {} bandwidth={} codecs={}",
                    representation.id().as_deref().unwrap_or("-"),
                    representation.bandwidth()?.unwrap_or_default(),
                    representation
                        .codecs()
                        .or_else(|| adaptation_set.codecs())
                        .as_deref()
                        .unwrap_or("-"),
                );
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = <MpdInfoArgs as clap::Parser>::parse();

    pretty_env_logger::formatted_builder()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    let mpd = args.load().await?;
    log::debug!("Loaded manifest with encoding {}", mpd.encoding());

    if args.dump {
        println!("{}", Parser::to_string(&mpd)?);
        return Ok(());
    }

    if !args.timings && !args.json {
        print_summary(&mpd)?;
        return Ok(());
    }

    let templates = collect_timings(&mpd)?;
    if templates.is_empty() {
        log::warn!("No SegmentTemplate found in {}", args.input);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&templates)?);
        return Ok(());
    }

    for template in templates {
        println!(
            "Period {} / AdaptationSet {} / Representation {}: {} segments",
            template.period.as_deref().unwrap_or("-"),
            template
                .adaptation_set
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string()),
            template.representation.as_deref().unwrap_or("-"),
            template.segments.len(),
        );
        for SegmentEntry { timing, url } in &template.segments {
            println!(
                "  #{:<6} {:>10.3}s +{:.3}s {}",
                timing.number,
                timing.start_time,
                timing.duration,
                url.as_deref().unwrap_or(""),
            );
        }
    }

    Ok(())
}
