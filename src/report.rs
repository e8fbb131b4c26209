use std::fmt::Write;

use crate::mapper;
use crate::models::{DailyRecord, Event, Thresholds, Track, TrackSummary};

pub fn summarize_tracks(events: &[Event]) -> Vec<TrackSummary> {
    [Track::Melody, Track::Storm, Track::Snow]
        .into_iter()
        .map(|track| {
            let track_events: Vec<&Event> = events.iter().filter(|e| e.track == track).collect();
            TrackSummary {
                track,
                event_count: track_events.len(),
                lowest_pitch: track_events.iter().map(|e| e.pitch).min(),
                highest_pitch: track_events.iter().map(|e| e.pitch).max(),
            }
        })
        .collect()
}

/// Days on which the mapper fired a storm chord or started a snow burst.
pub fn trigger_days(events: &[Event], track: Track) -> Vec<u32> {
    let starts: Vec<u32> = events
        .iter()
        .filter(|e| e.track == track)
        .map(|e| e.start_time)
        .collect();

    match track {
        Track::Melody => Vec::new(),
        Track::Storm => {
            let mut days = starts;
            days.dedup();
            days
        }
        // Bursts are emitted whole, so every burst opens a new chunk.
        Track::Snow => starts
            .chunks(mapper::SNOW_BURST_LEN)
            .map(|burst| burst[0])
            .collect(),
    }
}

fn track_label(track: Track) -> &'static str {
    match track {
        Track::Melody => "Melody",
        Track::Storm => "Storm",
        Track::Snow => "Snow",
    }
}

fn day_label(records: &[DailyRecord], day: u32) -> String {
    match records.get(day as usize).and_then(|r| r.date) {
        Some(date) => format!("day {} ({})", day, date),
        None => format!("day {}", day),
    }
}

pub fn build_report(
    source: &str,
    root_note: i32,
    records: &[DailyRecord],
    thresholds: &Thresholds,
    events: &[Event],
) -> String {
    let summaries = summarize_tracks(events);
    let mut output = String::new();

    let _ = writeln!(output, "# Weather Melody Report");
    let _ = writeln!(
        output,
        "Generated from {} ({} days, root note {})",
        source,
        records.len(),
        root_note
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Thresholds");
    let _ = writeln!(output, "- Storm precipitation above {:.3}", thresholds.storm);
    let _ = writeln!(output, "- Snowfall above {:.3}", thresholds.snow);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Tracks");

    for summary in summaries.iter() {
        match (summary.lowest_pitch, summary.highest_pitch) {
            (Some(low), Some(high)) => {
                let _ = writeln!(
                    output,
                    "- {}: {} events, pitches {}..={}",
                    track_label(summary.track),
                    summary.event_count,
                    low,
                    high
                );
            }
            _ => {
                let _ = writeln!(output, "- {}: no events", track_label(summary.track));
            }
        }
    }

    for track in [Track::Storm, Track::Snow] {
        let days = trigger_days(events, track);
        let _ = writeln!(output);
        let _ = writeln!(output, "## {} Days", track_label(track));

        if days.is_empty() {
            let _ = writeln!(output, "No days above the threshold.");
            continue;
        }

        for day in days {
            let _ = writeln!(output, "- {}", day_label(records, day));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::MapperConfig;
    use crate::scale::ScaleDefinition;
    use chrono::NaiveDate;

    fn event(track: Track, pitch: i32, start_time: u32) -> Event {
        Event {
            track,
            pitch,
            start_time,
            duration: 1,
            velocity: 100,
        }
    }

    fn records(days: usize) -> Vec<DailyRecord> {
        (0..days)
            .map(|i| DailyRecord {
                date: NaiveDate::from_ymd_opt(2019, 1, 1 + i as u32),
                max_temp: 40.0,
                precipitation: 0.0,
                snowfall: 0.0,
                thunder: false,
            })
            .collect()
    }

    #[test]
    fn summaries_cover_every_track() {
        let events = vec![
            event(Track::Melody, 60, 0),
            event(Track::Melody, 62, 1),
            event(Track::Storm, 36, 1),
            event(Track::Storm, 40, 1),
            event(Track::Storm, 48, 1),
        ];
        let summaries = summarize_tracks(&events);

        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[0].event_count, 2);
        assert_eq!(summaries[0].highest_pitch, Some(62));
        assert_eq!(summaries[1].lowest_pitch, Some(36));
        assert_eq!(summaries[2].event_count, 0);
        assert_eq!(summaries[2].lowest_pitch, None);
    }

    #[test]
    fn trigger_days_come_from_emitted_events() {
        let mut events = vec![event(Track::Melody, 60, 0), event(Track::Melody, 62, 1)];
        for pitch in [36, 40, 48] {
            events.push(event(Track::Storm, pitch, 1));
        }
        for pitch in [36, 40, 48] {
            events.push(event(Track::Storm, pitch, 3));
        }
        // overlapping bursts on days 2 and 3
        for start in [2, 3] {
            for beat in 0..4 {
                events.push(event(Track::Snow, 84, start + beat));
                events.push(event(Track::Snow, 96, start + beat));
            }
        }

        assert_eq!(trigger_days(&events, Track::Storm), vec![1, 3]);
        assert_eq!(trigger_days(&events, Track::Snow), vec![2, 3]);
        assert!(trigger_days(&events, Track::Melody).is_empty());
    }

    #[test]
    fn report_matches_mapper_output() {
        let mut days = records(4);
        days[2].snowfall = 6.0;
        days[3].precipitation = 3.0;
        days[3].thunder = true;
        let thresholds = Thresholds {
            storm: 1.0,
            snow: 1.0,
        };
        let events = mapper::map_weather(
            &days,
            &ScaleDefinition::major(),
            &MapperConfig::default(),
            &thresholds,
        )
        .unwrap();
        let report = build_report("nj.csv", 60, &days, &thresholds, &events);

        assert!(report.contains("## Storm Days\n- day 3 (2019-01-04)"));
        assert!(report.contains("## Snow Days\n- day 2 (2019-01-03)\n"));
    }

    #[test]
    fn report_lists_trigger_days_with_dates() {
        let mut events = vec![event(Track::Melody, 60, 0), event(Track::Melody, 62, 1)];
        for beat in 0..4 {
            events.push(event(Track::Snow, 84, 1 + beat));
            events.push(event(Track::Snow, 96, 1 + beat));
        }
        let days = records(3);
        let thresholds = Thresholds {
            storm: 0.5,
            snow: 1.25,
        };
        let report = build_report("nj.csv", 60, &days, &thresholds, &events);

        assert!(report.contains("# Weather Melody Report"));
        assert!(report.contains("Snowfall above 1.250"));
        assert!(report.contains("- Snow: 8 events, pitches 84..=96"));
        assert!(report.contains("- day 1 (2019-01-02)"));
        assert!(!report.contains("- day 2"));
        assert!(report.contains("- Storm: no events"));
    }
}
