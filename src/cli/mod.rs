mod commands;
mod handlers;

pub use commands::{Cli, Commands, PwaAction, PwaCommand};
pub use handlers::{
    handle_delete, handle_edit, handle_list, handle_new, handle_pwa_check, handle_pwa_manifest,
    handle_pwa_workbox, handle_show, Context,
};
