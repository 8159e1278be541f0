use clap::Parser;
use color_print::ceprintln;

use pyrite::hooks::{console::Console, dump::Dump, trace::Trace, Hook};
use pyrite::{Error, State};

#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Maximum number of executed instructions
    #[arg(short = 't', long)]
    tmax: Option<u64>,

    /// Stack dump configuration (YAML)
    #[arg(short, long)]
    dump_cfg: Option<String>,

    /// Dump the stack after every instruction
    #[arg(short = 'a', long)]
    dump_all: bool,

    /// Print progress and trace every instruction
    #[arg(short, long)]
    verbose: bool,

    #[arg(default_value = "main.pyrite")]
    input_file: String,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = emulate(&args) {
        ceprintln!("<red,bold>ERROR</>: {}", e);
        std::process::exit(1);
    }
}

fn emulate(args: &Args) -> Result<(), Error> {
    if args.verbose {
        ceprintln!("<s>Pyrite VM</>");
        eprintln!("+-----------------------------------------------+");
        eprintln!("| {:<45} |", args.input_file);
        eprintln!("+-----------------------------------------------+");
    }

    let mut state = State::load_file(&args.input_file)?;
    if state.program().is_empty() {
        ceprintln!(
            "<yellow,bold>WARNING</>: empty program '{}'",
            args.input_file
        );
        return Ok(());
    }

    let mut dump = Dump::arg(args.dump_cfg.clone(), args.dump_all)?;
    let mut console = Console::new(std::io::stdout());
    let mut trace = Trace::new(std::io::stderr());
    let mut hooks: Vec<&mut dyn Hook> = Vec::new();
    hooks.push(&mut dump);
    hooks.push(&mut console);
    if args.verbose {
        eprintln!("[INIT]");
        hooks.push(&mut trace);
    }

    let steps = pyrite::run(&mut state, &mut hooks, args.tmax)?;

    if args.verbose {
        eprintln!("[EXIT] {} steps", steps);
        eprintln!("=================================================");
    }
    Ok(())
}
