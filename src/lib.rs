// SPDX-License-Identifier: Apache-2.0

//! fig2gerber - Generate PCB fabrication files from XFig drawings
//!
//! Specific layers of an XFig 3.2 drawing carry the physical features of a
//! printed circuit board: copper pours, pads, solder mask openings, silk
//! legends and drill holes. This crate translates such a drawing into the
//! files a board house consumes: Gerber photoplotter artwork (plain RS274D
//! or extended two-image RS274X), an Excellon-style drill program, and a
//! drill tool usage report. The conversion scaling treats 1 cm in the
//! drawing as 100 mil in the output, so decimal grid snapping maps onto
//! standard pad distances.

pub mod catalog;
pub mod classify;
pub mod config;
pub mod converter;
pub mod drill;
pub mod emit;
pub mod error;
pub mod fig;
pub mod jobs;
pub mod progress;
pub mod transform;
