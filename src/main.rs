//! Assembles a font project source from per-glyph metadata and SVG outlines.

use fontasm::core;

fn main() {
    let cli_args = core::platform::get_cli_args();
    if let Err(error) = core::run_app(cli_args) {
        core::platform::handle_error(error);
    }
}
