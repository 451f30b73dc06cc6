//! CLI logic for the Joinery composition tool.
//!
//! This module contains the core CLI logic: loading the kit and design,
//! running the selected operation and writing the result as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Operation, RootRule};

use std::{fs, path::Path};

use log::{debug, info};
use serde::{Serialize, de::DeserializeOwned};

use joinery::{
    Composer, JoineryError,
    catalogue::{Catalogue, Kit},
    diagram::DiagramLayout,
    model::Design,
};

/// Screen-space diagram as written to the output file.
#[derive(Debug, Serialize)]
struct ScreenDiagram {
    width: f32,
    height: f32,
    pieces: Vec<ScreenPiece>,
}

#[derive(Debug, Serialize)]
struct ScreenPiece {
    id: String,
    x: f32,
    y: f32,
}

impl From<&DiagramLayout> for ScreenDiagram {
    fn from(layout: &DiagramLayout) -> Self {
        Self {
            width: layout.width(),
            height: layout.height(),
            pieces: layout
                .positions()
                .map(|(id, point)| ScreenPiece {
                    id: id.to_text(),
                    x: point.x(),
                    y: point.y(),
                })
                .collect(),
        }
    }
}

/// Run the Joinery CLI application
///
/// This function loads the kit and the design, runs the selected operation
/// and writes the resulting JSON to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `JoineryError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed kit or design files
/// - Validation errors
/// - Composition errors
pub fn run(args: &Args) -> Result<(), JoineryError> {
    info!(
        input_path = args.input,
        kit_path = args.kit,
        output_path = args.output,
        operation:? = args.operation;
        "Processing design"
    );

    let app_config = config::load_config(args)?;

    let kit: Kit = read_json(&args.kit)?;
    let catalogue = Catalogue::from(kit);
    debug!(
        types = catalogue.type_count(),
        designs = catalogue.design_count();
        "Kit loaded"
    );

    let design: Design = read_json(&args.input)?;

    let composer = Composer::new(app_config);
    let output = match args.operation {
        Operation::Compose => to_json(&composer.compose(&design, &catalogue)?)?,
        Operation::Flatten => to_json(&composer.flatten(&design, &catalogue)?)?,
        Operation::Order => to_json(&composer.order(&design)?)?,
        Operation::Diagram => {
            let layout = composer.diagram(&design, &catalogue)?;
            to_json(&ScreenDiagram::from(&layout))?
        }
    };

    fs::write(&args.output, output)?;

    info!(output_file = args.output; "Design exported successfully");

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, JoineryError> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(JoineryError::decode)
}

fn to_json(value: &impl Serialize) -> Result<String, JoineryError> {
    serde_json::to_string_pretty(value).map_err(JoineryError::decode)
}
