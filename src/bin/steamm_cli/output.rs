//! Output formatting for pump-steamm CLI
//!
//! JSON mode prints one [`CommandResponse`] envelope per command. Human mode
//! is plain text on stdout; logs always go to stderr.

use anyhow::Result;
use pump_steamm_core::{CommandResponse, TransactionPlan};
use pump_steamm_types::{PtbArgument, PtbCommand, TransactionInput};
use serde::Serialize;

pub fn print_response(response: &CommandResponse) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}

/// Print a successful result envelope.
pub fn print_json<T: Serialize>(result: &T, warnings: Vec<String>) -> Result<()> {
    let response = CommandResponse::ok(serde_json::to_value(result)?).with_warnings(warnings);
    print_response(&response)
}

pub fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        println!("\x1b[33mwarning:\x1b[0m {}", warning);
    }
}

fn format_argument(arg: &PtbArgument) -> String {
    match arg {
        PtbArgument::Input { index } => format!("Input({})", index),
        PtbArgument::Result { index } => format!("Result({})", index),
        PtbArgument::NestedResult {
            index,
            result_index,
        } => format!("NestedResult({}, {})", index, result_index),
        PtbArgument::GasCoin => "GasCoin".to_string(),
    }
}

fn format_arguments(args: &[PtbArgument]) -> String {
    args.iter()
        .map(format_argument)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Human-readable summary of a transaction plan.
pub fn format_plan(plan: &TransactionPlan) -> String {
    let mut out = String::new();

    if let Some(sender) = &plan.sender {
        out.push_str(&format!("Sender: {}\n", sender));
    }
    if let Some(budget) = plan.gas_budget {
        out.push_str(&format!(
            "Gas budget: {} MIST ({:.4} SUI)\n",
            budget,
            budget as f64 / 1_000_000_000.0
        ));
    }

    out.push_str("\x1b[1mInputs:\x1b[0m\n");
    for (i, input) in plan.inputs.iter().enumerate() {
        match input {
            TransactionInput::Pure { type_tag, value } => {
                out.push_str(&format!("  [{}] {} = {}\n", i, type_tag, value))
            }
            TransactionInput::Object { object_id } => {
                out.push_str(&format!("  [{}] object \x1b[36m{}\x1b[0m\n", i, object_id))
            }
        }
    }

    out.push_str("\x1b[1mCommands:\x1b[0m\n");
    for (i, command) in plan.commands.iter().enumerate() {
        let line = match command {
            PtbCommand::MoveCall {
                package,
                module,
                function,
                type_arguments,
                arguments,
            } => format!(
                "{}::{}::{}<{}>({})",
                package,
                module,
                function,
                type_arguments.join(", "),
                format_arguments(arguments)
            ),
            PtbCommand::SplitCoins { coin, amounts } => format!(
                "SplitCoins({}, [{}])",
                format_argument(coin),
                format_arguments(amounts)
            ),
            PtbCommand::TransferObjects { objects, address } => format!(
                "TransferObjects([{}], {})",
                format_arguments(objects),
                format_argument(address)
            ),
            PtbCommand::Publish {
                modules,
                dependencies,
            } => format!(
                "Publish({} module(s), deps [{}])",
                modules.len(),
                dependencies.join(", ")
            ),
        };
        out.push_str(&format!("  [{}] {}\n", i, line));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_plan_lists_inputs_and_commands() {
        let mut plan = TransactionPlan::default();
        let payment = plan.split_coin(PtbArgument::GasCoin, 5);
        let curve = plan.object("0xc0");
        plan.curve_call("0xdd", "buy", "0x1::a::A", vec![curve, payment]);

        let text = format_plan(&plan);
        assert!(text.contains("[0] u64 = 5"));
        assert!(text.contains("SplitCoins(GasCoin, [Input(0)])"));
        assert!(text.contains("0xdd::bonding_curve::buy<0x1::a::A>(Input(1), NestedResult(0, 0))"));
    }
}
