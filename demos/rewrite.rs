use clap::Parser;

use ast_rewrite::debug::{debug_tree, shared_nodes, tree_stats};
use ast_rewrite::dot::to_dot;
use ast_rewrite::node::{mul, num, plus, sub, Ast};
use ast_rewrite::predicate::{has_value, is_bin_op, is_value};
use ast_rewrite::rule::{Rule, RuleSet};
use ast_rewrite::within::match_within;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Run only this scenario (1-4). Runs all of them by default.
    #[arg(long, value_name = "INT")]
    scenario: Option<usize>,

    /// Print the input and result as a DOT graph.
    #[clap(long)]
    dot: bool,

    /// Enable debug logging of rule matches and rebuilds.
    #[clap(short, long)]
    verbose: bool,
}

fn value(node: &Ast) -> i64 {
    node.as_value().unwrap_or_default()
}

fn scenarios() -> Vec<(&'static str, RuleSet)> {
    vec![
        (
            "double every value",
            RuleSet::new().with(Rule::named("double", is_value(), |n| num(value(n) * 2))),
        ),
        (
            "every binary op becomes subtraction",
            RuleSet::new().with(Rule::named("to-sub", is_bin_op(), |n| match n.children() {
                Some((left, right)) => sub(left.clone(), right.clone()),
                None => n.clone(),
            })),
        ),
        (
            "binary node with a 2 below it becomes left * 4",
            RuleSet::new().with(Rule::named(
                "fold-two",
                is_bin_op() & match_within(has_value(2)),
                |n| num(n.left().map(value).unwrap_or_default() * 4),
            )),
        ),
        (
            "2 -> 3, then 3 -> -1",
            RuleSet::new()
                .with(Rule::named("inc-two", has_value(2), |n| num(value(n) + 1)))
                .with(Rule::named("dec-three", has_value(3), |n| num(value(n) - 4))),
        ),
    ]
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    log::info!("args = {:?}", args);

    let ast = mul(plus(num(1), num(2)), num(3));
    println!("ast = {}", ast.to_bracket_string());
    print!("{}", debug_tree(&ast));
    println!("stats: {}", tree_stats(&ast));

    for (i, (name, rules)) in scenarios().into_iter().enumerate() {
        let n = i + 1;
        if args.scenario.is_some_and(|s| s != n) {
            continue;
        }

        println!();
        println!("--- Scenario {}: {} ---", n, name);
        let result = rules.rewrite(&ast);
        println!("result = {}", result);
        println!("bracketed = {}", result.to_bracket_string());
        println!("reused {} node(s) from the input", shared_nodes(&ast, &result));

        if args.dot {
            println!("{}", to_dot(&[ast.clone(), result])?);
        }
    }

    Ok(())
}
