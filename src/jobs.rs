//! Output job definitions
//!
//! A job is one requested output file: its kind, the layer depths it
//! collects for the dark image, the knockout depths for the clear image of
//! extended artwork, the output file suffix and the RS274X image name.
//! Jobs are selected from the configuration flags and run sequentially.

use crate::config::Config;
use crate::error::{Fig2GerberError, Result, ResultExt};
use std::fs;
use tracing::debug;

/// Drawing layer carrying patterns transferred to every metalized plane
/// while transfer mode is active.
pub const TRANSFER_LAYER: i32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    /// Excellon-style drill program.
    Drill,
    /// Gerber photoplotter artwork, plain or extended.
    Artwork,
    /// Per-tool hole count report.
    ToolReport,
}

/// One render pass over the source: which depths participate and whether
/// round pads resolve to their knockout apertures.
#[derive(Debug, Clone, Copy)]
pub struct RenderPass<'a> {
    pub layers: &'a [i32],
    pub knockout_apertures: bool,
}

#[derive(Debug, Clone)]
pub struct Job {
    pub kind: JobKind,
    pub name: &'static str,
    pub suffix: &'static str,
    pub image_name: &'static str,
    dark: Vec<i32>,
    knockout: Vec<i32>,
}

const COMPONENT_COPPER: &[i32] = &[
    10, 11, 12, 13, 15, 16, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37,
    38, 39,
];
const SOLDER_COPPER: &[i32] = &[
    10, 11, 12, 13, 15, 16, 81, 82, 83, 84, 85, 86, 87, 88, 89, 90, 91, 92, 93, 94, 95, 96, 97,
    98, 99,
];
const INNER_COMPONENT: &[i32] = &[
    12, 15, 16, 41, 42, 43, 44, 45, 46, 47, 48, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 59,
];
const INNER_SOLDER: &[i32] = &[
    13, 15, 16, 61, 62, 63, 64, 65, 66, 67, 68, 69, 70, 71, 72, 73, 74, 75, 76, 77, 78, 79,
];
const COMPONENT_MASK: &[i32] = &[
    8, 10, 12, 13, 15, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34,
];
const SOLDER_MASK: &[i32] = &[
    9, 10, 12, 13, 15, 81, 82, 83, 84, 85, 86, 87, 88, 89, 90, 91, 92, 93, 94,
];
const TOP_SILK: &[i32] = &[6];
const BOTTOM_SILK: &[i32] = &[7];
const JOINT_MASK: &[i32] = &[
    8, 9, 10, 15, 16, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 81, 82, 83, 84, 85,
    86, 87, 88, 89, 90, 91, 92, 93, 94,
];

// Knockout (clear image) layers per copper job. Masks and silk carry none.
const COMPONENT_KNOCKOUT: &[i32] = &[20];
const SOLDER_KNOCKOUT: &[i32] = &[80];
const INNER_COMPONENT_KNOCKOUT: &[i32] = &[10, 11, 13, 40];
const INNER_SOLDER_KNOCKOUT: &[i32] = &[10, 11, 12, 60];

impl Job {
    fn artwork(
        name: &'static str,
        suffix: &'static str,
        image_name: &'static str,
        dark: &[i32],
        knockout: &[i32],
    ) -> Self {
        Self {
            kind: JobKind::Artwork,
            name,
            suffix,
            image_name,
            dark: dark.to_vec(),
            knockout: knockout.to_vec(),
        }
    }

    pub fn drill() -> Self {
        Self {
            kind: JobKind::Drill,
            name: "drill",
            suffix: ".holes.drl",
            image_name: "",
            dark: Vec::new(),
            knockout: Vec::new(),
        }
    }

    pub fn tool_report() -> Self {
        Self {
            kind: JobKind::ToolReport,
            name: "tool report",
            suffix: ".tools.mfg",
            image_name: "",
            dark: Vec::new(),
            knockout: Vec::new(),
        }
    }

    pub fn component_copper() -> Self {
        Self::artwork(
            "component copper",
            ".comp.lgx",
            "COMPONENTSIDE",
            COMPONENT_COPPER,
            COMPONENT_KNOCKOUT,
        )
    }

    pub fn solder_copper() -> Self {
        Self::artwork(
            "solder copper",
            ".bott.lgx",
            "BOTTOMSIDE",
            SOLDER_COPPER,
            SOLDER_KNOCKOUT,
        )
    }

    pub fn inner_component() -> Self {
        Self::artwork(
            "inner component",
            ".cmpinner.lgx",
            "COMP_INNER",
            INNER_COMPONENT,
            INNER_COMPONENT_KNOCKOUT,
        )
    }

    pub fn inner_solder() -> Self {
        Self::artwork(
            "inner solder",
            ".bottinner.lgx",
            "BOTTOM_INNER",
            INNER_SOLDER,
            INNER_SOLDER_KNOCKOUT,
        )
    }

    pub fn component_mask() -> Self {
        Self::artwork(
            "component solder mask",
            ".compsldmask.lgx",
            "COMP_SOLDERMASK",
            COMPONENT_MASK,
            &[],
        )
    }

    pub fn solder_mask() -> Self {
        Self::artwork(
            "solder-side solder mask",
            ".bottsldmask.lgx",
            "BOTT_SOLDERMASK",
            SOLDER_MASK,
            &[],
        )
    }

    pub fn joint_mask() -> Self {
        Self::artwork(
            "joint solder mask",
            ".jointsldmask.lgx",
            "JOINT_SOLDERMASK",
            JOINT_MASK,
            &[],
        )
    }

    pub fn top_silk() -> Self {
        Self::artwork("top silk screen", ".compsilk.lgx", "COMP_LEGEND", TOP_SILK, &[])
    }

    pub fn bottom_silk() -> Self {
        Self::artwork(
            "bottom silk screen",
            ".bottsilk.lgx",
            "BOTT_LEGEND",
            BOTTOM_SILK,
            &[],
        )
    }

    /// Ad-hoc layer window. The first layer of the list is the knockout
    /// layer; the remainder forms the dark image.
    pub fn custom(layers: &[i32]) -> Self {
        Self {
            kind: JobKind::Artwork,
            name: "custom layer set",
            suffix: ".arb.lgx",
            image_name: "SOMELAYER",
            dark: layers[1..].to_vec(),
            knockout: layers[..1].to_vec(),
        }
    }

    pub fn dark_pass(&self) -> RenderPass<'_> {
        RenderPass {
            layers: &self.dark,
            knockout_apertures: false,
        }
    }

    pub fn clear_pass(&self) -> RenderPass<'_> {
        RenderPass {
            layers: &self.knockout,
            knockout_apertures: true,
        }
    }
}

/// Build the job list from the configuration. Compound selections expand
/// exactly like their single-job counterparts; duplicate selections
/// collapse to one job.
pub fn from_config(config: &Config) -> Result<Vec<Job>> {
    let mut jobs = Vec::new();

    let compound = config.double_side || config.double_side_full || config.four_layer
        || config.four_layer_full;
    let with_masks = config.double_side_full || config.four_layer_full;
    let four = config.four_layer || config.four_layer_full;

    if config.drill || compound {
        jobs.push(Job::drill());
        jobs.push(Job::tool_report());
    }
    if config.component_copper || compound {
        jobs.push(Job::component_copper());
    }
    if config.solder_copper || compound {
        jobs.push(Job::solder_copper());
    }
    if config.inner_component || four {
        jobs.push(Job::inner_component());
    }
    if config.inner_solder || four {
        jobs.push(Job::inner_solder());
    }
    if with_masks && config.join_masks {
        jobs.push(Job::joint_mask());
    }
    if config.component_mask || (with_masks && !config.join_masks) {
        jobs.push(Job::component_mask());
    }
    if config.solder_mask || (with_masks && !config.join_masks) {
        jobs.push(Job::solder_mask());
    }
    if config.top_silk || with_masks {
        jobs.push(Job::top_silk());
    }
    if config.bottom_silk {
        jobs.push(Job::bottom_silk());
    }

    if let Some(start) = config.layer_start {
        let mut layers: Vec<i32> =
            (start as i32..start as i32 + config.layer_range as i32).collect();
        if config.transfer_mode {
            layers.push(TRANSFER_LAYER);
        }
        jobs.push(Job::custom(&layers));
    }

    if let Some(path) = &config.layer_file {
        let layers = read_layer_file(path)?;
        jobs.push(Job::custom(&layers));
    }

    debug!("selected {} output jobs", jobs.len());
    Ok(jobs)
}

fn read_layer_file(path: &std::path::Path) -> Result<Vec<i32>> {
    let text = fs::read_to_string(path).with_path_context("read layer", path)?;
    let mut layers = Vec::new();
    for token in text.split_ascii_whitespace() {
        let layer: i32 = token.parse().map_err(|_| Fig2GerberError::InvalidLayerFile {
            path: path.display().to_string(),
            value: token.to_string(),
        })?;
        if layer < 0 {
            return Err(Fig2GerberError::InvalidLayerFile {
                path: path.display().to_string(),
                value: token.to_string(),
            }
            .into());
        }
        layers.push(layer);
    }
    if layers.is_empty() {
        return Err(Fig2GerberError::EmptyLayerFile {
            path: path.display().to_string(),
        }
        .into());
    }
    Ok(layers)
}
