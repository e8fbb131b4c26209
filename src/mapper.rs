use log::debug;
use thiserror::Error;

use crate::models::{DailyRecord, Event, Thresholds, Track};
use crate::scale::{ScaleDefinition, ScaleWalker};

/// Storm chord intervals above `root - 24`: root, major third, octave.
const STORM_CHORD: [i32; 3] = [0, 4, 12];
const STORM_DURATION: u32 = 16;
const SNOW_BEATS: u32 = 4;
/// Storm chords sit two octaves under the root.
pub const LOWEST_ROOT: i32 = 24;
/// Each snow burst emits two pitches per beat.
pub const SNOW_BURST_LEN: usize = 2 * SNOW_BEATS as usize;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapperError {
    #[error("root note {root} outside {low}..={high}")]
    RootOutOfRange { root: i32, low: i32, high: i32 },
}

#[derive(Debug, Clone)]
pub struct MapperConfig {
    pub root_note: i32,
    pub velocity: u8,
    pub max_pitch: i32,
    pub max_days: Option<usize>,
}

impl MapperConfig {
    /// The seed must be a valid pitch and leave room for the storm chord below it.
    pub fn validate(&self) -> Result<(), MapperError> {
        if (LOWEST_ROOT..=self.max_pitch).contains(&self.root_note) {
            Ok(())
        } else {
            Err(MapperError::RootOutOfRange {
                root: self.root_note,
                low: LOWEST_ROOT,
                high: self.max_pitch,
            })
        }
    }
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            root_note: 60,
            velocity: 100,
            max_pitch: 127,
            max_days: None,
        }
    }
}

/// Carry state threaded through the daily pass.
struct Melody {
    walker: ScaleWalker,
    last_pitch: i32,
}

impl Melody {
    fn next_pitch(&mut self, tdelta: f64, max_pitch: i32) -> i32 {
        let pitch = if tdelta == 0.0 {
            self.last_pitch
        } else if tdelta < 0.0 {
            self.walker.step_down()
        } else {
            self.walker.step_up()
        };

        let pitch = if self.walker.get_note() > max_pitch {
            debug!(
                "{:?} above {}, resetting to root {}",
                self.walker.cursor(),
                max_pitch,
                self.walker.root_note()
            );
            self.walker.reset();
            self.walker.get_note()
        } else {
            pitch
        };

        self.last_pitch = pitch;
        pitch
    }
}

/// Walks the series once and emits melody, storm and snow events in order.
///
/// Thresholds must already be computed over the full series.
pub fn map_weather(
    records: &[DailyRecord],
    scale: &ScaleDefinition,
    config: &MapperConfig,
    thresholds: &Thresholds,
) -> Result<Vec<Event>, MapperError> {
    config.validate()?;
    let days = config
        .max_days
        .map_or(records.len(), |limit| limit.min(records.len()));
    let records = &records[..days];
    let mut events = Vec::new();

    if records.is_empty() {
        return Ok(events);
    }

    let root = config.root_note;
    let note = |track, pitch, start_time, duration| Event {
        track,
        pitch,
        start_time,
        duration,
        velocity: config.velocity,
    };

    events.push(note(Track::Melody, root, 0, 1));
    let mut melody = Melody {
        walker: ScaleWalker::new(root, scale.clone()),
        last_pitch: root,
    };

    for (i, pair) in records.windows(2).enumerate() {
        let (previous, today) = (&pair[0], &pair[1]);
        let day = (i + 1) as u32;

        let pitch = melody.next_pitch(today.max_temp - previous.max_temp, config.max_pitch);
        events.push(note(Track::Melody, pitch, day, 1));

        if today.precipitation > thresholds.storm && today.thunder {
            debug!("storm on day {} ({} precipitation)", day, today.precipitation);
            for interval in STORM_CHORD {
                events.push(note(Track::Storm, root - 24 + interval, day, STORM_DURATION));
            }
        }

        if today.snowfall > thresholds.snow {
            debug!("snow on day {} ({} snowfall)", day, today.snowfall);
            for beat in 0..SNOW_BEATS {
                events.push(note(Track::Snow, root + 24, day + beat, 1));
                events.push(note(Track::Snow, root + 36, day + beat, 1));
            }
        }
    }

    Ok(events)
}
