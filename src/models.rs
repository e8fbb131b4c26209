use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub date: Option<NaiveDate>,
    pub max_temp: f64,
    pub precipitation: f64,
    pub snowfall: f64,
    pub thunder: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    Melody,
    Storm,
    Snow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Event {
    pub track: Track,
    pub pitch: i32,
    pub start_time: u32,
    pub duration: u32,
    pub velocity: u8,
}

/// Events split per track, in emission order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrackEvents {
    pub melody: Vec<Event>,
    pub storm: Vec<Event>,
    pub snow: Vec<Event>,
}

impl TrackEvents {
    pub fn partition(events: &[Event]) -> Self {
        let mut tracks = TrackEvents::default();
        for event in events {
            match event.track {
                Track::Melody => tracks.melody.push(*event),
                Track::Storm => tracks.storm.push(*event),
                Track::Snow => tracks.snow.push(*event),
            }
        }
        tracks
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub storm: f64,
    pub snow: f64,
}

#[derive(Debug, Clone)]
pub struct TrackSummary {
    pub track: Track,
    pub event_count: usize,
    pub lowest_pitch: Option<i32>,
    pub highest_pitch: Option<i32>,
}
