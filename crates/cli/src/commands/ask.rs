//! `munglog ask`: single-question mode.

use super::{describe_failure, load_controller};

pub async fn run(message: String) -> Result<(), Box<dyn std::error::Error>> {
    let (_, controller) = load_controller()?;

    eprint!("  Thinking...");
    let result = controller.ask(&message).await;
    eprint!("\r              \r");

    match result {
        Ok(answer) => {
            println!("{answer}");
            Ok(())
        }
        Err(e) => {
            eprintln!("  [Error] {}", describe_failure(&e));
            Err(e.into())
        }
    }
}
