//! stache's command line entry point.
//! Loads a binding context, renders a template file against it and writes the result.

use stache::{
    cli::{get_args, Args},
    context::{load_context, load_from_stdin},
    error::{default_error_handler, Error, Result},
    matcher::strip_unresolved_tags,
    render::render_from_source_with_extension,
    value::Context,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Off
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Renders the template named on the command line.
///
/// # Flow
/// 1. Loads the binding context from a file, stdin, or starts empty
/// 2. Renders `<TEMPLATE>.<extension>`
/// 3. Optionally strips unresolved tags
/// 4. Writes to the output file or stdout
fn run(args: Args) -> Result<()> {
    let context = match (&args.context, args.stdin) {
        (_, true) => load_from_stdin()?,
        (Some(path), false) => load_context(path)?,
        (None, false) => Context::new(),
    };
    log::debug!("Rendering {} with {} context entries", args.template.display(), context.len());

    let mut output =
        render_from_source_with_extension(&args.template, &context, &[], &args.extension)?;
    if args.strip {
        output = strip_unresolved_tags(&output);
    }

    match args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(Error::IoError)?;
            }
            std::fs::write(&path, output).map_err(Error::IoError)
        }
        None => {
            print!("{output}");
            Ok(())
        }
    }
}
