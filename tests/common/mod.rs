//! Shared fixtures: banquets held at events, events held in rooms.

#![allow(dead_code)]

use relfield::prelude::*;
use std::sync::Arc;

#[derive(Debug, Record)]
#[record(display = "name")]
pub struct Building {
    pub name: String,
}

#[derive(Debug, Record)]
#[record(display = "name")]
pub struct Room {
    pub name: String,
    pub capacity: i32,
    #[record(relation = "Building")]
    pub building: Option<Arc<Building>>,
}

#[derive(Debug, Record)]
pub struct Event {
    pub date: String,
    #[record(relation = "Room")]
    pub room: Option<Arc<Room>>,
}

#[derive(Debug, Record)]
#[record(display = "name")]
pub struct Client {
    pub name: String,
    pub last_name: String,
}

#[derive(Debug, Record)]
#[record(model = "Banquet")]
pub struct Banquet {
    pub id: i64,
    #[record(relation = "Event")]
    pub event: Option<Arc<Event>>,
    #[record(relation = "Client")]
    pub client: Arc<Client>,
    #[record(many_to_many = "Client")]
    pub guests: Vec<Arc<Client>>,
    pub start_time: String,
    pub end_time: String,
    #[record(skip)]
    pub internal_notes: String,
}

pub fn building(name: &str) -> Arc<Building> {
    Arc::new(Building { name: name.into() })
}

pub fn room(name: &str, capacity: i32, building: Option<Arc<Building>>) -> Arc<Room> {
    Arc::new(Room {
        name: name.into(),
        capacity,
        building,
    })
}

pub fn event(date: &str, room: Option<Arc<Room>>) -> Arc<Event> {
    Arc::new(Event {
        date: date.into(),
        room,
    })
}

pub fn client(name: &str, last_name: &str) -> Arc<Client> {
    Arc::new(Client {
        name: name.into(),
        last_name: last_name.into(),
    })
}

/// A banquet on 2024-05-01 in Hall A of the Main building.
pub fn banquet() -> Banquet {
    banquet_with_event(Some(event(
        "2024-05-01",
        Some(room("Hall A", 120, Some(building("Main")))),
    )))
}

pub fn banquet_with_event(event: Option<Arc<Event>>) -> Banquet {
    Banquet {
        id: 1,
        event,
        client: client("Ada", "Lovelace"),
        guests: vec![client("Grace", "Hopper")],
        start_time: "18:00".into(),
        end_time: "23:00".into(),
        internal_notes: "vip".into(),
    }
}
