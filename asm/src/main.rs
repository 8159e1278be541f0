use pyasm::{util::print_dump, Diag, Error};
use std::path::Path;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    #[clap(default_value = "main.pyasm")]
    input: String,

    /// Output file [default: <INPUT>.pyrite]
    #[clap(short, long)]
    output: Option<String>,

    /// Dump assembly code
    #[clap(short, long)]
    dump: bool,
}

fn main() {
    use clap::Parser;
    let args = Args::parse();

    let source = match std::fs::read_to_string(&args.input) {
        Ok(source) => source,
        Err(e) => {
            Diag::file(&args.input, Error::FileOpen(args.input.clone(), e)).print(None);
            std::process::exit(1);
        }
    };

    if let Err(diag) = assemble(&args, &source) {
        diag.print(Some(&source));
        std::process::exit(1);
    }
}

fn assemble(args: &Args, source: &str) -> Result<(), Diag> {
    let (assembled, bin) = pyasm::build(&args.input, source)?;

    let output = match &args.output {
        Some(output) => output.clone(),
        None => Path::new(&args.input)
            .with_extension("pyrite")
            .to_string_lossy()
            .into_owned(),
    };
    std::fs::write(&output, &bin)
        .map_err(|e| Diag::file(&output, Error::FileWrite(output.clone(), e)))?;

    if args.dump {
        print_dump(&mut std::io::stdout(), &args.input, source, &assembled)
            .map_err(|e| Diag::file(&args.input, Error::FileWrite("<stdout>".to_string(), e)))?;
    }
    println!("{} bytes emitted", assembled.program.len());
    Ok(())
}
