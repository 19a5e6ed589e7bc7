use std::path::PathBuf;

use color_eyre::Result;
use forms::{FormController, FormValues};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::{
    action::Action,
    commands,
    components::{Component, form::FormView},
    config::Config,
    theme::Theme,
    tui::{Event, EventResponse, Tui},
};

const MAX_FORM_WIDTH: u16 = 96;

pub struct App {
    pub config: Config,
    pub form: FormView,
    pub output: Option<PathBuf>,
    pub mouse: bool,
    pub should_quit: bool,
    pub submitted: Option<FormValues>,
}

impl App {
    pub fn new(config: Config, controller: FormController, output: Option<PathBuf>, mouse: bool) -> Self {
        let theme = Theme::new(config.color_mode);
        Self {
            config,
            form: FormView::new(controller, theme),
            output,
            mouse,
            should_quit: false,
            submitted: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

        let mut tui = Tui::new()?
            .tick_rate(self.config.tick_rate)
            .frame_rate(self.config.frame_rate)
            .mouse(self.mouse)
            .paste(true);
        tui.enter()?;
        self.form.init()?;

        loop {
            if let Some(e) = tui.next().await {
                let stop_event_propagation = self
                    .form
                    .handle_events(e.clone())?
                    .map(|response| match response {
                        EventResponse::Continue(action) => {
                            action_tx.send(action).ok();
                            false
                        }
                        EventResponse::Stop(action) => {
                            action_tx.send(action).ok();
                            true
                        }
                    })
                    .unwrap_or(false);

                if !stop_event_propagation {
                    match e {
                        Event::Tick => action_tx.send(Action::Tick)?,
                        Event::Render => action_tx.send(Action::Render)?,
                        Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
                        Event::Error => action_tx.send(Action::Error("terminal event stream failed".into()))?,
                        _ => {}
                    }
                }
            }

            while let Ok(action) = action_rx.try_recv() {
                if action != Action::Tick && action != Action::Render {
                    debug!("{action:?}");
                }
                match &action {
                    Action::Quit => self.should_quit = true,
                    Action::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, *w, *h))?;
                        self.draw(&mut tui, &action_tx)?;
                    }
                    Action::Render | Action::Update => self.draw(&mut tui, &action_tx)?,
                    Action::Error(msg) => error!("{msg}"),
                    Action::PickFiles { field, paths } => {
                        self.form.pick_files(field, paths).await?;
                        action_tx.send(Action::Update)?;
                    }
                    Action::Submitted(values) => {
                        self.submitted = Some(values.clone());
                        self.should_quit = true;
                    }
                    _ => {}
                }

                if let Some(action) = self.form.update(action)? {
                    action_tx.send(action)?
                };
            }

            if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;

        match &self.submitted {
            Some(values) => {
                info!(filled = commands::filled_count(values), "form submitted");
                commands::write_values(values, self.output.as_deref())?;
            }
            None => info!("form closed without submitting"),
        }
        Ok(())
    }

    fn draw(&mut self, tui: &mut Tui, action_tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        let mut rendered = Ok(());
        tui.draw(|f| rendered = self.render(f))?;
        if let Err(err) = rendered {
            action_tx.send(Action::Error(format!("Failed to draw: {err:?}")))?;
        }
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame<'_>) -> Result<()> {
        let [area] = Layout::horizontal([Constraint::Max(MAX_FORM_WIDTH)])
            .flex(Flex::Center)
            .areas(frame.area());
        self.form.draw(frame, area)
    }
}
