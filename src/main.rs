#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::wasm_bindgen;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() {
    elementquiz::wasm::mount();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    terminal::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod terminal {
    use std::io::{self, BufRead, Write};
    use std::process::ExitCode;

    use elementquiz::{QuestionBank, QuizConfig, QuizMode, Session, SessionError, Step};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const DEFAULT_BANK_PATH: &str = "elements.json";
    const CONFIG_ENV: &str = "ELEMENTQUIZ_CONFIG";

    enum Next {
        Again,
        ChangeMode,
        Quit,
    }

    pub fn run() -> ExitCode {
        let config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => QuizConfig::from_path(&path),
            None => Ok(QuizConfig::default()),
        };
        let session = match config.and_then(Session::new) {
            Ok(session) => session,
            Err(error) => {
                eprintln!("invalid configuration: {}", error);
                return ExitCode::FAILURE;
            }
        };

        let bank_path = std::env::args()
            .nth(1)
            .unwrap_or_else(|| DEFAULT_BANK_PATH.to_string());

        let bank = match QuestionBank::from_path(&bank_path) {
            Ok(bank) => bank,
            Err(error) => {
                eprintln!("question bank could not be loaded, the quiz cannot start.");
                eprintln!("{}", error);
                return ExitCode::FAILURE;
            }
        };

        match play(&bank, session) {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) => {
                eprintln!("terminal error: {}", error);
                ExitCode::FAILURE
            }
        }
    }

    fn play(bank: &QuestionBank, mut session: Session) -> io::Result<()> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut rng = StdRng::from_entropy();

        println!("Element practice: {} records loaded.", bank.len());
        let Some(name) = prompt(&mut input, "Name: ")? else {
            return Ok(());
        };
        let Some(class) = prompt(&mut input, "Class: ")? else {
            return Ok(());
        };
        let Some(seat) = prompt(&mut input, "Seat: ")? else {
            return Ok(());
        };
        let learner = session.learner_mut();
        learner.name = name;
        learner.class = class;
        learner.seat = seat;

        'modes: loop {
            let Some(mode) = choose_mode(&mut input)? else {
                return Ok(());
            };
            if let Err(error) = session.start(mode, bank, &mut rng) {
                eprintln!("{}", error);
                return Ok(());
            }

            loop {
                if !play_game(&mut input, &mut session, bank, &mut rng)? {
                    return Ok(());
                }

                println!();
                println!("== Summary ==");
                println!("{}", session.summary());

                match choose_next(&mut input)? {
                    Next::Again => {
                        if let Err(error) = session.play_again(bank, &mut rng) {
                            eprintln!("{}", error);
                            return Ok(());
                        }
                    }
                    Next::ChangeMode => {
                        session.change_mode();
                        continue 'modes;
                    }
                    Next::Quit => return Ok(()),
                }
            }
        }
    }

    /// Runs until the game finishes. Returns `false` when input ran out.
    fn play_game(
        input: &mut impl BufRead,
        session: &mut Session,
        bank: &QuestionBank,
        rng: &mut StdRng,
    ) -> io::Result<bool> {
        while !session.is_finished() {
            let Some(view) = session.current_question(bank, rng) else {
                return Ok(true);
            };

            if let Some(progress) = session.progress() {
                println!();
                println!(
                    "Round {} | {} / {} ({}%)",
                    progress.round, progress.position, progress.total, progress.percent
                );
            }
            println!("Q{}. {}", view.number, view.text);
            for (index, option) in view.options.iter().enumerate() {
                println!("  {}) {}", index + 1, option);
            }

            let Some(answer) = prompt(input, "Your answer (1/2): ")? else {
                return Ok(false);
            };
            let selection = match answer.as_str() {
                "1" => Some(view.options[0].as_str()),
                "2" => Some(view.options[1].as_str()),
                "" => None,
                other => Some(other),
            };

            match session.submit(bank, rng, selection) {
                Ok(_) => {}
                Err(SessionError::MissingSelection) => {
                    println!("Please choose an option first.");
                    continue;
                }
                Err(error) => {
                    println!("{}", error);
                    continue;
                }
            }

            if let Some(feedback) = session.round().and_then(|round| round.feedback()) {
                println!("{}", feedback);
            }
            if let Some(outcome) = session.last_outcome() {
                println!("Options: {}", outcome.review(bank).join(", "));
            }

            if prompt(input, "Press Enter for the next question...")?.is_none() {
                return Ok(false);
            }

            match session.advance(bank, rng) {
                Ok(Step::NextRound { ordinal }) => {
                    println!();
                    println!("Perfect round! Moving on to round {}.", ordinal);
                }
                Ok(_) => {}
                Err(error) => println!("{}", error),
            }
        }

        Ok(true)
    }

    fn choose_mode(input: &mut impl BufRead) -> io::Result<Option<QuizMode>> {
        loop {
            println!();
            println!("Choose a practice mode:");
            for mode in QuizMode::ALL {
                println!("  {}", mode);
            }

            let Some(answer) = prompt(input, "Mode (1-4): ")? else {
                return Ok(None);
            };
            match answer.parse::<QuizMode>() {
                Ok(mode) => return Ok(Some(mode)),
                Err(error) => println!("{}", error),
            }
        }
    }

    fn choose_next(input: &mut impl BufRead) -> io::Result<Next> {
        loop {
            let Some(answer) =
                prompt(input, "[a] play again (same mode), [m] choose another mode, [q] quit: ")?
            else {
                return Ok(Next::Quit);
            };
            match answer.to_ascii_lowercase().as_str() {
                "a" => return Ok(Next::Again),
                "m" => return Ok(Next::ChangeMode),
                "q" => return Ok(Next::Quit),
                _ => continue,
            }
        }
    }

    /// Prints `label` and reads one trimmed line. `None` means end of input.
    fn prompt(input: &mut impl BufRead, label: &str) -> io::Result<Option<String>> {
        print!("{}", label);
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
