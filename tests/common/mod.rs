// Shared test doubles for the integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use bollydle::{AudioPrimitive, Catalog, PlayTicket, Track};

/// Everything the fake audio element was asked to do.
#[derive(Debug, Default)]
pub struct AudioLog {
    pub src: Option<String>,
    pub loads: usize,
    pub plays: Vec<PlayTicket>,
    pub pauses: usize,
    pub seeks: Vec<f64>,
    pub current_time: f64,
    pub duration: Option<f64>,
    pub volume: Option<f64>,
    pub attached: Option<u64>,
    pub attach_count: usize,
    pub detach_count: usize,
}

/// Recording `AudioPrimitive`; clones share one log so the test can keep a
/// handle after the session takes ownership.
#[derive(Clone, Default)]
pub struct FakeAudio {
    pub log: Rc<RefCell<AudioLog>>,
}

impl FakeAudio {
    pub fn new() -> (Self, Rc<RefCell<AudioLog>>) {
        let fake = FakeAudio::default();
        let log = fake.log.clone();
        (fake, log)
    }
}

impl AudioPrimitive for FakeAudio {
    fn set_source(&mut self, src: &str) {
        self.log.borrow_mut().src = Some(src.to_string());
    }

    fn load(&mut self) {
        self.log.borrow_mut().loads += 1;
    }

    fn play(&mut self, ticket: PlayTicket) {
        self.log.borrow_mut().plays.push(ticket);
    }

    fn pause(&mut self) {
        self.log.borrow_mut().pauses += 1;
    }

    fn set_current_time(&mut self, seconds: f64) {
        let mut log = self.log.borrow_mut();
        log.seeks.push(seconds);
        log.current_time = seconds;
    }

    fn current_time(&self) -> f64 {
        self.log.borrow().current_time
    }

    fn duration(&self) -> Option<f64> {
        self.log.borrow().duration
    }

    fn set_volume(&mut self, volume: f64) {
        self.log.borrow_mut().volume = Some(volume);
    }

    fn attach(&mut self, generation: u64) {
        let mut log = self.log.borrow_mut();
        log.attached = Some(generation);
        log.attach_count += 1;
    }

    fn detach(&mut self) {
        let mut log = self.log.borrow_mut();
        if log.attached.take().is_some() {
            log.detach_count += 1;
        }
    }
}

pub fn track(id: u32, title: &str) -> Track {
    Track {
        id,
        title: title.to_string(),
        audio_ref: format!("https://cdn.example/{}.mp3", id),
    }
}

pub fn bollywood_catalog() -> Catalog {
    Catalog::new(vec![
        track(1, "Kabhi Khushi Kabhie Gham"),
        track(2, "Dil Chahta Hai"),
        track(3, "Dil Se Re"),
        track(4, "Kal Ho Naa Ho"),
        track(5, "Dilbaro"),
        track(6, "Chaiyya Chaiyya"),
        track(7, "Dil Diyan Gallan"),
        track(8, "Tujhe Dekha To"),
        track(9, "Dilli 6"),
        track(10, "Mera Dil Bhi Kitna Pagal Hai"),
    ])
    .expect("valid catalog")
}
