#![cfg(target_arch = "wasm32")]

use crate::{
    Learner, QuestionBank, QuestionView, QuizMode, Round, Session, SessionError, Step, Table,
    TableFormat,
};
use gloo_net::http::Request;
use leptos::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

const BANK_PATH: &str = "elements.json";

#[derive(Clone, Copy, PartialEq, Eq)]
enum Screen {
    ModeSelect,
    Quiz,
    Summary,
}

impl Screen {
    fn of(session: &Session) -> Self {
        if session.mode().is_none() {
            Screen::ModeSelect
        } else if session.is_finished() {
            Screen::Summary
        } else {
            Screen::Quiz
        }
    }
}

/// Signals shared by every page. All session mutation goes through [`QuizHandles::apply`].
#[derive(Clone, Copy)]
struct QuizHandles {
    session: RwSignal<Session>,
    bank: RwSignal<Option<Rc<QuestionBank>>>,
    rng: StoredValue<StdRng>,
    question: RwSignal<Option<QuestionView>>,
    selection: RwSignal<Option<String>>,
    warning: RwSignal<Option<String>>,
}

impl QuizHandles {
    fn apply(
        self,
        action: impl FnOnce(&mut Session, &QuestionBank, &mut StdRng) -> Result<Step, SessionError>,
    ) {
        let Some(bank) = self.bank.get_untracked() else {
            return;
        };

        let mut result = Err(SessionError::NotInRound);
        let mut next_question = None;
        self.rng.update_value(|rng| {
            self.session.update(|session| {
                result = action(session, &bank, rng);
                next_question = session.current_question(&bank, rng);
            });
        });

        match result {
            Ok(Step::Answered { correct }) => {
                log::debug!("answer submitted (correct: {})", correct);
                self.warning.set(None);
            }
            Ok(step) => {
                log::debug!("transition: {:?}", step);
                self.warning.set(None);
                self.selection.set(None);
            }
            Err(SessionError::MissingSelection) => {
                self.warning
                    .set(Some(SessionError::MissingSelection.to_string()));
            }
            Err(error) => log::debug!("transition rejected: {}", error),
        }

        self.question.set(next_question);
    }

    fn change_mode(self) {
        self.session.update(Session::change_mode);
        self.question.set(None);
        self.selection.set(None);
        self.warning.set(None);
    }

    fn submitted(self) -> bool {
        self.session
            .with(|session| session.round().map(Round::is_submitted).unwrap_or(false))
    }
}

async fn fetch_bank(path: &str) -> Result<QuestionBank, String> {
    let format = path
        .rsplit('.')
        .next()
        .and_then(TableFormat::from_extension)
        .ok_or_else(|| format!("unsupported question bank format: {}", path))?;

    let response = Request::get(path)
        .send()
        .await
        .map_err(|error| error.to_string())?;
    if !response.ok() {
        return Err(format!("failed to fetch {}: HTTP {}", path, response.status()));
    }

    let text = response.text().await.map_err(|error| error.to_string())?;
    let table =
        Table::parse(&text, format).map_err(|error| format!("failed to parse {}: {}", path, error))?;
    QuestionBank::from_table(table).map_err(|error| error.to_string())
}

#[component]
fn ModeSelect(handles: QuizHandles, learner: RwSignal<Learner>) -> impl IntoView {
    let picked = create_rw_signal(QuizMode::ALL[0]);

    let start = move |_| {
        let mode = picked.get_untracked();
        let identity = learner.get_untracked();
        handles.apply(move |session, bank, rng| {
            *session.learner_mut() = identity;
            session.start(mode, bank, rng)
        });
    };

    view! {
        <section class="panel">
            <h2>"Choose a practice mode"</h2>
            <div class="mode-list">
                {QuizMode::ALL
                    .into_iter()
                    .map(|mode| {
                        view! {
                            <label class="mode-option">
                                <input
                                    type="radio"
                                    name="mode"
                                    prop:checked=move || picked.get() == mode
                                    on:change=move |_| picked.set(mode)
                                />
                                <span>{mode.label()}</span>
                            </label>
                        }
                    })
                    .collect_view()}
            </div>
            <LearnerFields learner=learner />
            <button class="primary" on:click=start>
                "Start ▶"
            </button>
        </section>
    }
}

#[component]
fn LearnerFields(learner: RwSignal<Learner>) -> impl IntoView {
    view! {
        <div class="learner-fields">
            <label>
                "Name"
                <input
                    type="text"
                    prop:value=move || learner.with(|value| value.name.clone())
                    on:input=move |ev| learner.update(|value| value.name = event_target_value(&ev))
                />
            </label>
            <label>
                "Class"
                <input
                    type="text"
                    prop:value=move || learner.with(|value| value.class.clone())
                    on:input=move |ev| learner.update(|value| value.class = event_target_value(&ev))
                />
            </label>
            <label>
                "Seat"
                <input
                    type="text"
                    prop:value=move || learner.with(|value| value.seat.clone())
                    on:input=move |ev| learner.update(|value| value.seat = event_target_value(&ev))
                />
            </label>
        </div>
    }
}

#[component]
fn QuizPage(handles: QuizHandles, learner: RwSignal<Learner>) -> impl IntoView {
    let QuizHandles {
        session,
        bank,
        question,
        selection,
        warning,
        ..
    } = handles;

    create_effect(move |_| {
        let identity = learner.get();
        if session.with_untracked(|session| session.learner() != &identity) {
            session.update(|session| *session.learner_mut() = identity);
        }
    });

    let progress = move || session.with(Session::progress);
    let feedback = move || {
        session.with(|session| {
            session
                .round()
                .and_then(Round::feedback)
                .map(|feedback| (feedback.correct, feedback.to_string()))
        })
    };
    let review = move || {
        if !handles.submitted() {
            return None;
        }
        let bank = bank.get()?;
        session.with(|session| session.last_outcome().map(|outcome| outcome.review(&bank)))
    };

    let primary = move |_| {
        let picked = selection.get_untracked();
        handles.apply(move |session, bank, rng| {
            session.primary_action(bank, rng, picked.as_deref())
        });
    };

    view! {
        <div class="play-page">
            <aside class="sidebar">
                <p class="eyebrow">"Your details"</p>
                <LearnerFields learner=learner />
                <p class="label">"Mode locked:"</p>
                <p>{move || session.with(|session| session.mode().map(|mode| mode.label()).unwrap_or(""))}</p>
                <button class="pill" on:click=move |_| handles.change_mode()>
                    "Restart (choose mode again)"
                </button>
            </aside>

            <section class="panel play-panel">
                {move || progress().map(|progress| view! {
                    <div class="progress-card">
                        <div class="progress-meta">
                            <span>{format!("Round {} | Progress: {} / {}", progress.round, progress.position, progress.total)}</span>
                            <span>{format!("{}%", progress.percent)}</span>
                        </div>
                        <progress value={progress.position} max={progress.total.max(1)}></progress>
                    </div>
                })}

                {move || question.get().map(|current| view! {
                    <h2>{format!("Q{}. {}", current.number, current.text)}</h2>
                    <div class="options">
                        {current
                            .options
                            .into_iter()
                            .map(|option| {
                                let checked = option.clone();
                                let value = option.clone();
                                view! {
                                    <label class="option">
                                        <input
                                            type="radio"
                                            name="answer"
                                            prop:checked=move || selection.get().as_deref() == Some(checked.as_str())
                                            prop:disabled=move || handles.submitted()
                                            on:change=move |_| selection.set(Some(value.clone()))
                                        />
                                        <span>{option}</span>
                                    </label>
                                }
                            })
                            .collect_view()}
                    </div>
                })}

                {move || warning.get().map(|message| view! { <p class="feedback-warning">{message}</p> })}

                {move || feedback().map(|(correct, message)| {
                    let class = if correct {
                        "feedback-small feedback-correct"
                    } else {
                        "feedback-small feedback-wrong"
                    };
                    view! { <div class=class>{message}</div> }
                })}

                <button class="primary" on:click=primary>
                    {move || if handles.submitted() { "Next question" } else { "Submit answer" }}
                </button>

                {move || review().map(|options| view! {
                    <div class="review">
                        <p class="label">"Options for this question:"</p>
                        <p>{options.join(", ")}</p>
                    </div>
                })}
            </section>
        </div>
    }
}

#[component]
fn SummaryPage(handles: QuizHandles) -> impl IntoView {
    let summary = handles.session.with_untracked(Session::summary);

    view! {
        <section class="panel summary">
            <h2>"Summary"</h2>
            <h3>{format!("Total Answered: {}", summary.answered)}</h3>
            <h3>{format!("Total Correct: {}", summary.correct)}</h3>
            <h3>{format!("Accuracy: {}", summary.accuracy_label())}</h3>
            <div class="header-actions">
                <button
                    class="primary"
                    on:click=move |_| handles.apply(|session, bank, rng| session.play_again(bank, rng))
                >
                    "Play again (same mode)"
                </button>
                <button class="pill" on:click=move |_| handles.change_mode()>
                    "Choose another mode"
                </button>
            </div>
        </section>
    }
}

#[component]
fn App() -> impl IntoView {
    let handles = QuizHandles {
        session: create_rw_signal(Session::default()),
        bank: create_rw_signal(None),
        rng: store_value(StdRng::from_entropy()),
        question: create_rw_signal(None),
        selection: create_rw_signal(None),
        warning: create_rw_signal(None),
    };
    let learner = create_rw_signal(Learner::default());
    let load_error = create_rw_signal::<Option<String>>(None);
    let screen = create_memo(move |_| handles.session.with(Screen::of));

    spawn_local(async move {
        match fetch_bank(BANK_PATH).await {
            Ok(bank) => {
                log::info!("question bank ready: {} elements", bank.len());
                handles.bank.set(Some(Rc::new(bank)));
            }
            Err(message) => {
                log::error!("question bank failed to load: {}", message);
                load_error.set(Some(message));
            }
        }
    });

    view! {
        <main class="page">
            <header class="page-header">
                <p class="eyebrow">"Chem / Element Practice"</p>
            </header>
            {move || {
                if let Some(message) = load_error.get() {
                    return view! {
                        <section class="error-card">
                            <p class="eyebrow">"The question bank could not be loaded"</p>
                            <pre class="error-body">{message}</pre>
                        </section>
                    }
                    .into_view();
                }

                if handles.bank.with(Option::is_none) {
                    return view! {
                        <section class="placeholder-card">
                            <p class="lede">"Loading question bank..."</p>
                        </section>
                    }
                    .into_view();
                }

                match screen.get() {
                    Screen::ModeSelect => view! { <ModeSelect handles=handles learner=learner /> }.into_view(),
                    Screen::Quiz => view! { <QuizPage handles=handles learner=learner /> }.into_view(),
                    Screen::Summary => view! { <SummaryPage handles=handles /> }.into_view(),
                }
            }}
        </main>
    }
}

pub fn mount() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("logging initialized");
    mount_to_body(|| view! { <App /> });
}
