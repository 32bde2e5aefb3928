use clap::Parser;
use polish::{DivisionPolicy, RpnEvaluator};
use tracing_subscriber::EnvFilter;

/// Evaluate infix or RPN arithmetic over ^ * / + -
#[derive(Parser, Debug)]
#[command(name = "polish")]
struct Args {
    /// Treat the input as RPN instead of infix
    #[arg(long)]
    rpn: bool,

    /// Let division by zero produce inf/NaN instead of failing
    #[arg(long)]
    ieee_division: bool,

    /// Print the built-in example expressions and exit
    #[arg(long)]
    demo: bool,

    /// Space delimited expression, starts a prompt if missing
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    expression: Vec<String>,
}

mod repl {
    use polish::{InfixParser, RpnEvaluator};

    pub fn evalexpr(eval: &RpnEvaluator, input: &str) {
        match InfixParser::new().parse_str(input) {
            Err(e) => println!("Parse error: {}", e),
            Ok(rpn) => match eval.eval(&rpn) {
                Err(e) => println!("Eval error: {}", e),
                Ok(result) => println!("{} = {}", rpn, result),
            },
        };
    }

    pub fn evalrpn(eval: &RpnEvaluator, input: &str) {
        match eval.calculate(input) {
            Err(e) => println!("Eval error: {}", e),
            Ok(result) => println!("{}", result),
        }
    }

    pub fn demo(eval: &RpnEvaluator) {
        const RPN: [&str; 7] = [
            "1 1 -",
            "5 3 2 * +",
            "4 8 2 * 8 + -",
            "1 1 9 * 0 + -",
            "2 3 ^",
            "1 2 120 * 63 / +",
            "1 5 3 * 2 + -",
        ];
        const INFIX: [&str; 7] = [
            "1 - 1",
            "5 + 3 * 2",
            "4 - 8 * 2 + 8",
            "1 - 1 * 9 + 0",
            "2 ^ 3",
            "1 + 2 * 120 / 63",
            "1 - 5 * 3 + 2",
        ];
        const COMPLEX: [&str; 3] = [
            "5 ^ 2 * 10 / 2 + 2 - 1",
            "5 - 2 + 10 / 2 * 2 ^ 1",
            "5 ^ 2 * 10 / 2 + 2 - 1 + 5 - 2 + 10 / 2 * 2 ^ 1",
        ];
        let parser = InfixParser::new();
        let show = |expr: &str, result: Result<f64, String>| match result {
            Ok(r) => println!("Expression: {} = {}", expr, r),
            Err(e) => println!("Expression: {} failed: {}", expr, e),
        };

        println!("\n====== Polish ======\n");
        for &expr in RPN.iter() {
            show(expr, eval.calculate(expr).map_err(|e| e.to_string()));
        }
        println!("\n====== Infix ======\n");
        for &expr in INFIX.iter().chain(COMPLEX.iter()) {
            if expr == COMPLEX[0] {
                println!("\n====== More Complicated Infix ======\n");
            }
            show(expr, parser.calculate_with(eval, expr).map_err(|e| e.to_string()));
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let division = if args.ieee_division { DivisionPolicy::Ieee } else { DivisionPolicy::Reject };
    let eval = RpnEvaluator::new().with_division(division);

    if args.demo {
        repl::demo(&eval);
        return Ok(());
    }
    let run = |input: &str| {
        if args.rpn {
            repl::evalrpn(&eval, input)
        } else {
            repl::evalexpr(&eval, input)
        }
    };

    if !args.expression.is_empty() {
        run(args.expression.join(" ").trim());
        return Ok(());
    }

    let histpath = dirs::home_dir().map(|h| h.join(".polish_history"));
    let mut rl = rustyline::DefaultEditor::new()?;
    if let Some(path) = &histpath {
        if rl.load_history(path).is_err() {
            println!("No history yet");
        }
    }
    let prompt = if args.rpn { "rpn> " } else { ">> " };
    while let Ok(input) = rl.readline(prompt) {
        let input = input.split_whitespace().collect::<Vec<_>>().join(" ");
        if input == "exit" {
            break;
        }
        if input.is_empty() {
            continue;
        }
        rl.add_history_entry(input.as_str())?;
        run(&input);
    }
    if let Some(path) = &histpath {
        rl.save_history(path)?;
    }
    Ok(())
}
