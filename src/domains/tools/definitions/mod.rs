//! Tool definitions, grouped by the YApi resource they operate on.

pub mod interface;

pub use interface::{
    CreateInterfaceParams, CreateInterfaceTool, GetInterfaceParams, GetInterfaceTool,
    SaveInterfaceParams, SaveInterfaceTool, SearchInterfacesParams, SearchInterfacesTool,
    UpdateInterfaceParams, UpdateInterfaceTool,
};
