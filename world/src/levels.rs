//! Compiled-in level data.
//!
//! The overworld is a 2x2 grid of 20x15 sections. Each row lists the tile keys
//! of one section row, separated by single spaces.

use crate::{LevelData, SectionData};

/// Returns the level the game starts with when no level file is supplied.
#[must_use]
pub fn starting_level() -> LevelData {
    LevelData {
        sections: vec![
            vec![section(&SECTION_0_0), section(&SECTION_1_0)],
            vec![section(&SECTION_0_1), section(&SECTION_1_1)],
        ],
    }
}

fn section(rows: &[&str]) -> SectionData {
    SectionData {
        rows: rows.iter().map(|row| (*row).to_owned()).collect(),
    }
}

#[rustfmt::skip]
const SECTION_0_0: [&str; 15] = [
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-H _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` 0-` 0-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` 0-` 0-` 0-` 0-` 0-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` 0-` 0-` 0-` 0-` 0-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` 0-` 0-` 0-` 0-` 0-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` 0-` 0-` 0-` 0-` 0-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` 0-` 0-` 0-` 0-` 0-` 0-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` 0-` 0-` 0-` _-` _-` 0-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _W` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _W` _W` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-H _-` _-`",
    "_-` _-` _-` _W` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
];

#[rustfmt::skip]
const SECTION_1_0: [&str; 15] = [
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-M _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` 0-` 0-` 0-` 0-` 0-` 0-` 0-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _W` _-` 0-` 0-` 0-` 0-` 0-` 0-` 0-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` 0-` 0-` 0-` 0-` 0-` 0-` 0-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` 0-` 0-` 0-` 0-` 0-` 0-` 0-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` 0-` 0-` 0-` 0-` 0-` 0-` 0-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` 0-` 0-` _-` _-H _-` 0-` 0-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` 0-` 0-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` 0-` 0-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` 0-` 0-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _W` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
];

#[rustfmt::skip]
const SECTION_0_1: [&str; 15] = [
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-H _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` 0-` 0-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` 0-` 0-` 0-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _W` _W` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` 0-` 0-` 0-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` 0-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` 0-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-S _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` 0-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` 0-` 0-` _-` _-`",
    "_-` _-` 0-` 0-` 0-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
];

#[rustfmt::skip]
const SECTION_1_1: [&str; 15] = [
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` 0-` 0-` 0-` 0-` 0-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` 0-` 0-` 0-` 0-` 0-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` 0-` 0-` 0-` 0-` 0-` _-` _-` _-`",
    "_-` _-` 0-` _-` _-` _-` _-` _-` _-` _-` _-` _-` 0-` 0-` 0-` 0-` 0-` _-` _-` _-`",
    "_-` _-` 0-` _-` _-` _-` _-` _-` _-` _-` _-` _-` 0-` 0-` 0-` 0-` 0-` _-` _-` _-`",
    "_-` _-` 0-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _W` _WH _W` _-` _-` _-` _-`",
    "_-` _-` 0-` _-` _-` _-` _-M _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` 0-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` 0-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` 0-` 0-` 0-` 0-` 0-` 0-` 0-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-H _-`",
    "_-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-` _-`",
];
