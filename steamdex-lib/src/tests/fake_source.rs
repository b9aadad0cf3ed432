//! Canned [`GameSource`] for pipeline and orchestrator tests.

use std::collections::HashMap;
use std::sync::Mutex;

use steamdex_client::{DetailOutcome, FetchError};
use steamdex_core::{AppDetails, AppId, AppListEntry, AppStats};

use crate::pipeline::GameSource;

#[derive(Debug, Clone)]
pub enum DetailReply {
    Game(AppDetails),
    NotFound,
    Fail,
    Throttle,
    Panic,
}

#[derive(Debug, Clone)]
pub enum StatsReply {
    Stats(AppStats),
    Fail,
    Throttle,
}

#[derive(Default)]
pub struct FakeSource {
    pub apps: Vec<AppId>,
    pub list_fails: bool,
    pub details: HashMap<AppId, DetailReply>,
    pub stats: HashMap<AppId, StatsReply>,
    pub detail_calls: Mutex<Vec<AppId>>,
}

pub fn game(name: &str) -> AppDetails {
    AppDetails {
        name: Some(name.to_string()),
        header_image: Some(format!("https://cdn.example/{}.jpg", name)),
        developers: vec!["Studio".to_string()],
        publishers: vec!["Label".to_string()],
        supported_languages: Some("English".to_string()),
        short_description: Some(format!("About {}", name)),
        ..AppDetails::default()
    }
}

impl FakeSource {
    /// Every ID is a complete game named `Game <id>`.
    pub fn with_games(ids: impl IntoIterator<Item = AppId>) -> Self {
        let mut source = Self::default();
        for id in ids {
            source.apps.push(id);
            source.details.insert(id, DetailReply::Game(game(&format!("Game {}", id))));
        }
        source
    }

    pub fn set(&mut self, id: AppId, reply: DetailReply) -> &mut Self {
        if !self.apps.contains(&id) {
            self.apps.push(id);
        }
        self.details.insert(id, reply);
        self
    }

    pub fn calls(&self) -> Vec<AppId> {
        let mut calls = self.detail_calls.lock().unwrap().clone();
        calls.sort_unstable();
        calls
    }
}

fn throttled() -> FetchError {
    FetchError::Throttled {
        url: "https://fake.example/".to_string(),
        attempts: 3,
    }
}

impl GameSource for FakeSource {
    async fn app_list(&self) -> Result<Vec<AppListEntry>, FetchError> {
        if self.list_fails {
            return Err(FetchError::Status {
                status: 503,
                url: "https://fake.example/list".to_string(),
            });
        }
        Ok(self
            .apps
            .iter()
            .map(|&appid| AppListEntry {
                appid,
                name: String::new(),
            })
            .collect())
    }

    async fn details(&self, id: AppId) -> Result<DetailOutcome, FetchError> {
        self.detail_calls.lock().unwrap().push(id);
        match self.details.get(&id).cloned() {
            Some(DetailReply::Game(d)) => Ok(DetailOutcome::Success(Box::new(d))),
            Some(DetailReply::NotFound) | None => Ok(DetailOutcome::NotFound),
            Some(DetailReply::Fail) => Err(FetchError::RetriesExhausted {
                status: 502,
                url: "https://fake.example/details".to_string(),
                attempts: 11,
            }),
            Some(DetailReply::Throttle) => Err(throttled()),
            Some(DetailReply::Panic) => panic!("detail handler exploded for {}", id),
        }
    }

    async fn stats(&self, id: AppId) -> Result<AppStats, FetchError> {
        match self.stats.get(&id).cloned() {
            Some(StatsReply::Stats(s)) => Ok(s),
            None => Ok(AppStats::default()),
            Some(StatsReply::Fail) => Err(FetchError::Status {
                status: 404,
                url: "https://fake.example/spy".to_string(),
            }),
            Some(StatsReply::Throttle) => Err(throttled()),
        }
    }
}
