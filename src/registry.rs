// src/registry.rs
//
// Flat-record shapes of the persistent stores. Column order is stable;
// downstream consumers read these as plain CSV.

use std::error::Error;

use crate::bracket::Round;

/// Player registry columns, in file order.
pub const PLAYER_HEADERS: [&str; 7] =
    ["id", "name", "name_norm", "ioc", "first_seen", "last_seen", "match_count"];

/// Match registry columns, in file order. Ids are the trailing fields.
pub const MATCH_HEADERS: [&str; 9] = [
    "tourney_id", "round", "score",
    "winner_name", "winner_name_norm", "loser_name", "loser_name_norm",
    "winner_id", "loser_id",
];

/// One registry player. Identity is `name_norm`; `id` is a stable surrogate
/// assigned at first sight and never reused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerRecord {
    pub id: u32,
    pub name: String,
    pub name_norm: String,
    pub ioc: String,
    pub first_seen: String,
    pub last_seen: String,
    pub match_count: u32,
}

impl PlayerRecord {
    pub fn from_row(row: &[String]) -> Result<PlayerRecord, Box<dyn Error>> {
        if row.len() < 7 {
            return Err(format!("player row too short: {} fields", row.len()).into());
        }
        Ok(PlayerRecord {
            id: row[0].parse()?,
            name: row[1].clone(),
            name_norm: row[2].clone(),
            ioc: row[3].clone(),
            first_seen: row[4].clone(),
            last_seen: row[5].clone(),
            match_count: row[6].parse().unwrap_or(0),
        })
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.name_norm.clone(),
            self.ioc.clone(),
            self.first_seen.clone(),
            self.last_seen.clone(),
            self.match_count.to_string(),
        ]
    }
}

/// One merged match, attached to both players' surrogate ids. This is the
/// pipeline's terminal artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchRecord {
    pub tourney_id: String,
    pub round: Round,
    pub score: String,
    pub winner_name: String,
    pub winner_name_norm: String,
    pub loser_name: String,
    pub loser_name_norm: String,
    pub winner_id: u32,
    pub loser_id: u32,
}

impl MatchRecord {
    pub fn from_row(row: &[String]) -> Result<MatchRecord, Box<dyn Error>> {
        if row.len() < 9 {
            return Err(format!("match row too short: {} fields", row.len()).into());
        }
        let round = Round::from_code(&row[1])
            .ok_or_else(|| format!("unknown round code: {}", row[1]))?;
        Ok(MatchRecord {
            tourney_id: row[0].clone(),
            round,
            score: row[2].clone(),
            winner_name: row[3].clone(),
            winner_name_norm: row[4].clone(),
            loser_name: row[5].clone(),
            loser_name_norm: row[6].clone(),
            winner_id: row[7].parse()?,
            loser_id: row[8].parse()?,
        })
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.tourney_id.clone(),
            s!(self.round.code()),
            self.score.clone(),
            self.winner_name.clone(),
            self.winner_name_norm.clone(),
            self.loser_name.clone(),
            self.loser_name_norm.clone(),
            self.winner_id.to_string(),
            self.loser_id.to_string(),
        ]
    }
}

pub fn headers(h: &[&str]) -> Vec<String> {
    h.iter().map(|s| s.to_string()).collect()
}
