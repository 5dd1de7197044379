use std::{
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Subcommand;
use lvl_engine::{formats::MAX_LAYERS, GridPosition, Level, ObjectKind, ObjectType, Theme};
use lvl_engine_edit::EditState;

use crate::{Options, ToolResult};

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Create an empty level, the size only applies until the level is reloaded
    New {
        file: PathBuf,
        /// Width in cells, defaults to the configured section width
        #[arg(long)]
        width: Option<i32>,
        /// Height in cells, defaults to the configured section height
        #[arg(long)]
        height: Option<i32>,
    },

    /// Print the layers and object counts of a level
    Info { file: PathBuf },

    /// Export a level as JSON
    Export {
        file: PathBuf,
        /// Defaults to the level file with a .json extension
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Color palette, defaults to the configured theme
        #[arg(long)]
        theme: Option<String>,
    },

    /// Place an object on a cell
    Place {
        file: PathBuf,
        #[arg(allow_negative_numbers = true)]
        col: i32,
        #[arg(allow_negative_numbers = true)]
        row: i32,
        /// Palette name, e.g. ground, goomba or hill
        type_name: String,
        /// Missing layers up to this index are created
        #[arg(long)]
        layer: Option<usize>,
    },

    /// Erase the topmost object on a cell
    Erase {
        file: PathBuf,
        #[arg(allow_negative_numbers = true)]
        col: i32,
        #[arg(allow_negative_numbers = true)]
        row: i32,
        #[arg(long)]
        layer: Option<usize>,
    },

    /// Flood fill the region around a cell with a tile type
    Fill {
        file: PathBuf,
        #[arg(allow_negative_numbers = true)]
        col: i32,
        #[arg(allow_negative_numbers = true)]
        row: i32,
        type_name: String,
        #[arg(long)]
        layer: Option<usize>,
    },

    /// Print the effective options
    Options {
        /// Write the default options to the configuration directory
        #[arg(long)]
        write_defaults: bool,
    },
}

pub fn execute(command: &Command, options: &Options, out: &mut impl Write) -> ToolResult<()> {
    match command {
        Command::New { file, width, height } => {
            let mut state = create_state(Level::default(), options);
            state.new_level(width.unwrap_or(options.section_width), height.unwrap_or(options.section_height));
            state.save_as(file)?;
            let section = state.get_current_section();
            writeln!(out, "Created {} ({}x{} cells)", file.display(), section.width(), section.height())?;
        }
        Command::Info { file } => {
            let state = open_state(file, options)?;
            print_info(&state, file, out)?;
        }
        Command::Export { file, output, theme } => {
            let state = open_state(file, options)?;
            let output = output.clone().unwrap_or_else(|| file.with_extension("json"));
            let theme_name = theme.as_deref().unwrap_or(&options.theme);
            let theme = if theme_name.is_empty() { None } else { Some(Theme::by_name(theme_name)?) };
            state.export_json(&output, theme)?;
            writeln!(out, "Exported {}", output.display())?;
        }
        Command::Place {
            file,
            col,
            row,
            type_name,
            layer,
        } => {
            let mut state = open_state(file, options)?;
            let object_type = resolve_type(type_name)?;
            let layer = ensure_layer(&mut state, *layer)?;
            match state.place_object_on(layer, GridPosition::from_cell(*col, *row), &object_type)? {
                Some(object) => writeln!(out, "Placed {} at {}", object.object_type(), object.position())?,
                None => writeln!(out, "Nothing placed, the cell is occupied or the layer is locked")?,
            }
            save_if_dirty(&mut state)?;
        }
        Command::Erase { file, col, row, layer } => {
            let mut state = open_state(file, options)?;
            let layer = layer.unwrap_or(state.get_current_layer());
            match state.erase_object_on(layer, GridPosition::from_cell(*col, *row))? {
                Some(object) => writeln!(out, "Erased {} at {}", object.object_type(), object.position())?,
                None => writeln!(out, "Nothing to erase")?,
            }
            save_if_dirty(&mut state)?;
        }
        Command::Fill {
            file,
            col,
            row,
            type_name,
            layer,
        } => {
            let mut state = open_state(file, options)?;
            let object_type = resolve_type(type_name)?;
            if object_type.kind != ObjectKind::Tile {
                anyhow::bail!("Only tiles can be used for filling, '{type_name}' is a {}", object_type.kind);
            }
            let layer = ensure_layer(&mut state, *layer)?;
            let created = state.fill_on(layer, GridPosition::from_cell(*col, *row), &object_type)?;
            writeln!(out, "Filled {} cells with {}", created.len(), object_type.name)?;
            save_if_dirty(&mut state)?;
        }
        Command::Options { write_defaults } => {
            if *write_defaults {
                let file = Options::default().store_options()?;
                writeln!(out, "Wrote default options to {}", file.display())?;
            } else {
                write!(out, "{}", options.to_toml()?)?;
            }
        }
    }
    Ok(())
}

fn create_state(level: Level, options: &Options) -> EditState {
    let mut state = EditState::with_viewport(level, options.viewport_size(), options.zoom);
    state.set_save_options(options.save_options());
    state
}

fn open_state(file: &Path, options: &Options) -> ToolResult<EditState> {
    let mut state = create_state(Level::default(), options);
    state.load_file(file).with_context(|| format!("Can't open level {}", file.display()))?;
    Ok(state)
}

fn save_if_dirty(state: &mut EditState) -> ToolResult<()> {
    if state.is_dirty() {
        state.save()?;
    }
    Ok(())
}

/// `.lvl` files only store layers that own objects, so layers are created on demand.
fn ensure_layer(state: &mut EditState, layer: Option<usize>) -> ToolResult<usize> {
    let Some(layer) = layer else {
        return Ok(state.get_current_layer());
    };
    if layer >= MAX_LAYERS {
        anyhow::bail!("Layer {layer} is out of range, at most {MAX_LAYERS} layers are supported");
    }
    while state.get_current_section().layer_count() <= layer {
        state.set_current_layer(usize::MAX);
        state.add_new_layer("")?;
    }
    Ok(layer)
}

fn resolve_type(type_name: &str) -> ToolResult<ObjectType> {
    ObjectType::classify(type_name).with_context(|| format!("Unknown object type '{type_name}'"))
}

fn print_info(state: &EditState, file: &Path, out: &mut impl Write) -> ToolResult<()> {
    let section = state.get_current_section();
    writeln!(out, "{}", file.display())?;
    writeln!(
        out,
        "  size: {}x{} cells ({}x{} px)",
        section.width(),
        section.height(),
        section.pixel_width(),
        section.pixel_height()
    )?;
    for (index, layer) in section.layers().iter().enumerate() {
        let counts: Vec<String> = ObjectKind::ALL
            .iter()
            .map(|kind| format!("{} {kind}", layer.objects_of(*kind).count()))
            .collect();
        writeln!(out, "  layer {index} '{}': {}", layer.title(), counts.join(", "))?;
    }
    writeln!(out, "  total: {} objects", section.object_count())?;
    Ok(())
}
