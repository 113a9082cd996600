//! `munglog chat`: interactive REPL over one dialogue session.

use std::io::Write;

use munglog_agent::DialogueController;
use munglog_memory::Turn;
use tokio::io::{self, AsyncBufReadExt, BufReader};

use super::{describe_failure, load_controller};

/// What one line of REPL input asks for.
#[derive(Debug, PartialEq, Eq)]
enum ReplInput<'a> {
    Skip,
    Exit,
    Reset,
    History,
    Question(&'a str),
}

fn parse_line(line: &str) -> ReplInput<'_> {
    let line = line.trim();
    match line {
        "" => ReplInput::Skip,
        "exit" | "quit" | "/exit" | "/quit" | ":q" => ReplInput::Exit,
        "/reset" => ReplInput::Reset,
        "/history" => ReplInput::History,
        question => ReplInput::Question(question),
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (config, controller) = load_controller()?;

    println!();
    println!("  🐶 멍로그 상담 챗봇 (Munglog interactive mode)");
    println!("  ==============================================");
    println!();
    println!("  Provider:  {}", config.provider);
    println!("  Model:     {}", config.model);
    println!("  Filter:    {}", config.filter.strategy);
    println!("  Memory:    last {} turns", config.session.capacity);
    println!();
    println!("  Type your question and press Enter.");
    println!("  '/history' lists this session, '/reset' clears it, 'exit' quits.");
    println!();

    let mut lines = BufReader::new(io::stdin()).lines();

    prompt()?;
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            ReplInput::Skip => {}
            ReplInput::Exit => break,
            ReplInput::Reset => {
                controller.reset().await;
                println!("  대화 기록이 초기화되었습니다.");
                println!();
            }
            ReplInput::History => {
                let turns = controller.history().await;
                if turns.is_empty() {
                    println!("  (no turns yet)");
                }
                for turn in &turns {
                    println!("{}", format_turn(turn));
                }
                println!();
            }
            ReplInput::Question(question) => answer(&controller, question).await,
        }
        prompt()?;
    }

    println!();
    println!("  Goodbye! 🐾");
    println!();
    Ok(())
}

async fn answer(controller: &DialogueController, question: &str) {
    eprint!("  ...");
    let result = controller.ask(question).await;
    eprint!("\r     \r");

    match result {
        Ok(answer) => {
            println!();
            for line in answer.lines() {
                println!("  Munglog > {line}");
            }
            println!();
        }
        Err(e) => {
            eprintln!("  [Error] {}", describe_failure(&e));
            println!();
        }
    }
}

/// One history entry, local time first.
fn format_turn(turn: &Turn) -> String {
    let at = turn.created_at().with_timezone(&chrono::Local).format("%H:%M:%S");
    let tag = if turn.is_refusal() { " [refused]" } else { "" };
    format!(
        "  [{at}]{tag}\n    Q: {}\n    A: {}",
        turn.question(),
        turn.answer()
    )
}

fn prompt() -> std::io::Result<()> {
    print!("  You > ");
    std::io::stdout().flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(parse_line(""), ReplInput::Skip);
        assert_eq!(parse_line("   \t"), ReplInput::Skip);
    }

    #[test]
    fn exit_words_end_the_session() {
        for word in ["exit", "quit", "/exit", "/quit", ":q", "  exit  "] {
            assert_eq!(parse_line(word), ReplInput::Exit, "{word}");
        }
    }

    #[test]
    fn reset_command_is_recognised() {
        assert_eq!(parse_line("/reset"), ReplInput::Reset);
    }

    #[test]
    fn history_command_is_recognised() {
        assert_eq!(parse_line(" /history "), ReplInput::History);
    }

    #[test]
    fn history_entry_shows_question_answer_and_refusal() {
        let answered = format_turn(&Turn::answered("강아지 사료", "A 사료"));
        assert!(answered.contains("Q: 강아지 사료"));
        assert!(answered.contains("A: A 사료"));
        assert!(!answered.contains("[refused]"));

        let refused = format_turn(&Turn::refused("오늘 날씨 어때", "죄송하지만"));
        assert!(refused.contains("[refused]"));
        assert!(refused.starts_with("  ["));
    }

    #[test]
    fn questions_are_trimmed() {
        assert_eq!(
            parse_line("  강아지가 토를 해요 \n"),
            ReplInput::Question("강아지가 토를 해요")
        );
    }
}
