use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::TableState;
use ratatui::DefaultTerminal;
use tracing::{error, info};

use crate::config::{Config, FONT_SIZE_MAX, FONT_SIZE_MIN};
use crate::error::{QuestsError, Result};
use crate::event::{AppEvent, Event, EventHandler};
use crate::player::Player;
use crate::quest::Quest;
use crate::storage::{SaveData, Storage};

/// Which screen currently owns the keyboard.
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Main,
    Settings(SettingsDraft),
    Annotations(String),
}

/// Scratch copy of the settings while the dialog is open. Nothing is applied
/// or persisted until the user confirms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsDraft {
    pub dark_theme: bool,
    pub font_size: u16,
}

/// Focus target inside the main screen: one of the form fields, or the
/// quest tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Name,
    Difficulty,
    Exp,
    Coins,
    Description,
    Quests,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Name => Focus::Difficulty,
            Focus::Difficulty => Focus::Exp,
            Focus::Exp => Focus::Coins,
            Focus::Coins => Focus::Description,
            Focus::Description => Focus::Quests,
            Focus::Quests => Focus::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Name => Focus::Quests,
            Focus::Difficulty => Focus::Name,
            Focus::Exp => Focus::Difficulty,
            Focus::Coins => Focus::Exp,
            Focus::Description => Focus::Coins,
            Focus::Quests => Focus::Description,
        }
    }

    pub fn in_form(self) -> bool {
        self != Focus::Quests
    }
}

/// Which quest list is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestTab {
    Active,
    History,
}

/// Raw create-form fields. Everything is kept as typed text and parsed on
/// submit, so validation failures leave the form intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestForm {
    pub name: String,
    pub difficulty: String,
    pub exp_reward: String,
    pub coin_reward: String,
    pub description: String,
}

impl Default for QuestForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            difficulty: "0".to_string(),
            exp_reward: String::new(),
            coin_reward: String::new(),
            description: String::new(),
        }
    }
}

impl QuestForm {
    pub fn field_mut(&mut self, focus: Focus) -> Option<&mut String> {
        match focus {
            Focus::Name => Some(&mut self.name),
            Focus::Difficulty => Some(&mut self.difficulty),
            Focus::Exp => Some(&mut self.exp_reward),
            Focus::Coins => Some(&mut self.coin_reward),
            Focus::Description => Some(&mut self.description),
            Focus::Quests => None,
        }
    }

    /// Reset every field, difficulty back to the spinner default.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupKind {
    Info,
    Error,
}

/// Modal message over the current screen, dismissed with Enter or Esc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub kind: PopupKind,
    pub message: String,
}

impl Popup {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: PopupKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: PopupKind::Error,
            message: message.into(),
        }
    }

    pub fn title(&self) -> &str {
        match self.kind {
            PopupKind::Info => "Sucesso",
            PopupKind::Error => "Erro",
        }
    }
}

/// Application.
///
/// Owns the player, the ordered quest list and the configuration; every
/// mutation flows through the operations below and the view re-reads the
/// model on the next draw.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    pub running: bool,
    /// Current app mode/screen.
    pub mode: AppMode,
    /// Progression totals; the level is derived on demand.
    pub player: Player,
    /// All quests, active and completed, in insertion order.
    pub quests: Vec<Quest>,
    /// Persisted settings.
    pub config: Config,
    /// Create-quest form state.
    pub form: QuestForm,
    /// Focused widget on the main screen.
    pub focus: Focus,
    /// Selected quest tab.
    pub tab: QuestTab,
    /// Row selection of the active table.
    pub active_state: TableState,
    /// Row selection of the history table.
    pub history_state: TableState,
    /// Pending modal message, if any.
    pub popup: Option<Popup>,
    /// Event handler.
    pub events: EventHandler,
    storage: Storage,
}

impl App {
    /// Constructs a new instance of [`App`] from persisted state. Load
    /// failures are fatal: the app refuses to start over unknown state.
    pub fn new(storage: Storage) -> Result<Self> {
        let data = storage.load()?;
        info!("Dados carregados: {} quests", data.quests.len());
        Ok(Self {
            running: true,
            mode: AppMode::Main,
            player: Player::new(data.exp, data.coins),
            quests: data.quests,
            config: data.config,
            form: QuestForm::default(),
            focus: Focus::Name,
            tab: QuestTab::Active,
            active_state: TableState::default(),
            history_state: TableState::default(),
            popup: None,
            events: EventHandler::new(),
            storage,
        })
    }

    /// Run the application's main loop, persisting state once on the way
    /// out.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let mut needs_redraw = true;

        while self.running {
            if needs_redraw {
                terminal.draw(|frame| frame.render_widget(&mut self, frame.area()))?;
                // save power
                needs_redraw = false;
            }

            match self.events.next().await? {
                Event::Tick => {}
                Event::Crossterm(event) => {
                    if let crossterm::event::Event::Key(key_event) = event {
                        self.handle_key_events(key_event);
                        needs_redraw = true;
                    }
                }
                Event::App(app_event) => {
                    self.apply_event(app_event);
                    needs_redraw = true;
                }
            }
        }

        if let Err(e) = self.save() {
            error!("Falha ao salvar dados ao sair: {e}");
            return Err(e.into());
        }
        Ok(())
    }

    /// Translates key presses into [`AppEvent`]s depending on which screen
    /// and widget own the keyboard.
    pub fn handle_key_events(&mut self, key_event: KeyEvent) {
        // Ctrl-C always quits, whatever is on screen.
        if key_event.modifiers == KeyModifiers::CONTROL
            && matches!(key_event.code, KeyCode::Char('c' | 'C'))
        {
            self.events.send(AppEvent::Quit);
            return;
        }

        // A popup is modal: swallow everything until it is dismissed.
        if self.popup.is_some() {
            if matches!(key_event.code, KeyCode::Enter | KeyCode::Esc) {
                self.events.send(AppEvent::ClosePopup);
            }
            return;
        }

        match &self.mode {
            AppMode::Settings(_) => match key_event.code {
                KeyCode::Esc => self.events.send(AppEvent::Cancel),
                KeyCode::Enter => self.events.send(AppEvent::Submit),
                KeyCode::Char(' ' | 't') => self.events.send(AppEvent::ToggleTheme),
                KeyCode::Up | KeyCode::Char('+') => self.events.send(AppEvent::FontUp),
                KeyCode::Down | KeyCode::Char('-') => self.events.send(AppEvent::FontDown),
                _ => {}
            },
            AppMode::Annotations(_) => match key_event.code {
                KeyCode::Char('s' | 'S') if key_event.modifiers == KeyModifiers::CONTROL => {
                    self.events.send(AppEvent::Submit)
                }
                KeyCode::Esc => self.events.send(AppEvent::Cancel),
                KeyCode::Enter => self.events.send(AppEvent::Input('\n')),
                KeyCode::Backspace => self.events.send(AppEvent::Backspace),
                KeyCode::Char(ch) => self.events.send(AppEvent::Input(ch)),
                _ => {}
            },
            AppMode::Main if self.focus.in_form() => match key_event.code {
                KeyCode::Tab | KeyCode::Down => self.events.send(AppEvent::FocusNext),
                KeyCode::BackTab | KeyCode::Up => self.events.send(AppEvent::FocusPrev),
                KeyCode::Enter => self.events.send(AppEvent::Submit),
                KeyCode::Esc => self.events.send(AppEvent::Cancel),
                KeyCode::Backspace => self.events.send(AppEvent::Backspace),
                KeyCode::Char(ch) => self.events.send(AppEvent::Input(ch)),
                _ => {}
            },
            AppMode::Main => match key_event.code {
                KeyCode::Esc | KeyCode::Char('q') => self.events.send(AppEvent::Quit),
                KeyCode::Up | KeyCode::Char('k') => self.events.send(AppEvent::CursorUp),
                KeyCode::Down | KeyCode::Char('j') => self.events.send(AppEvent::CursorDown),
                KeyCode::Left | KeyCode::Char('h') => self.events.send(AppEvent::PrevTab),
                KeyCode::Right | KeyCode::Char('l') => self.events.send(AppEvent::NextTab),
                KeyCode::Tab | KeyCode::Char('n') => self.events.send(AppEvent::FocusNext),
                KeyCode::BackTab => self.events.send(AppEvent::FocusPrev),
                KeyCode::Char('c') => self.events.send(AppEvent::CompleteSelected),
                KeyCode::Char('d') => self.events.send(AppEvent::DeleteSelected),
                KeyCode::Char('s') => self.events.send(AppEvent::OpenSettings),
                KeyCode::Char('a') => self.events.send(AppEvent::OpenAnnotations),
                _ => {}
            },
        }
    }

    /// Executes one queued [`AppEvent`] against the model.
    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Quit => self.quit(),
            AppEvent::ClosePopup => self.popup = None,
            AppEvent::FocusNext => self.focus = self.focus.next(),
            AppEvent::FocusPrev => self.focus = self.focus.prev(),
            AppEvent::CursorUp => self.move_cursor(-1),
            AppEvent::CursorDown => self.move_cursor(1),
            AppEvent::NextTab | AppEvent::PrevTab => self.switch_tab(),
            AppEvent::Input(ch) => self.input(ch),
            AppEvent::Backspace => self.backspace(),
            AppEvent::Submit => self.submit(),
            AppEvent::Cancel => self.cancel(),
            AppEvent::CompleteSelected => self.complete_selected(),
            AppEvent::DeleteSelected => self.delete_selected(),
            AppEvent::OpenSettings => {
                self.mode = AppMode::Settings(SettingsDraft {
                    dark_theme: self.config.dark_theme,
                    font_size: self.config.font_size,
                })
            }
            AppEvent::OpenAnnotations => {
                self.mode = AppMode::Annotations(self.config.annotations.clone())
            }
            AppEvent::ToggleTheme => {
                if let AppMode::Settings(draft) = &mut self.mode {
                    draft.dark_theme = !draft.dark_theme;
                }
            }
            AppEvent::FontUp => {
                if let AppMode::Settings(draft) = &mut self.mode {
                    draft.font_size = draft.font_size.saturating_add(1).min(FONT_SIZE_MAX);
                }
            }
            AppEvent::FontDown => {
                if let AppMode::Settings(draft) = &mut self.mode {
                    draft.font_size = draft.font_size.saturating_sub(1).max(FONT_SIZE_MIN);
                }
            }
        }
    }

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.running = false;
    }

    // --- controller operations ------------------------------------------

    /// Parse the form and append a new active quest. Numeric fields are
    /// validated before the name, and a failed validation leaves both the
    /// form and the quest list untouched.
    pub fn create_quest(&mut self) -> Result<()> {
        let difficulty: i64 = self
            .form
            .difficulty
            .trim()
            .parse()
            .map_err(|_| QuestsError::InvalidNumericInput)?;
        let exp_reward: i64 = self
            .form
            .exp_reward
            .trim()
            .parse()
            .map_err(|_| QuestsError::InvalidNumericInput)?;
        let coin_reward: i64 = self
            .form
            .coin_reward
            .trim()
            .parse()
            .map_err(|_| QuestsError::InvalidNumericInput)?;
        if self.form.name.is_empty() {
            return Err(QuestsError::EmptyQuestName);
        }

        let description = self.form.description.trim().to_string();
        self.quests.push(Quest::new(
            self.form.name.clone(),
            difficulty,
            exp_reward,
            coin_reward,
            description,
        ));
        self.form.clear();
        Ok(())
    }

    /// Complete the first active quest with the given name and credit its
    /// rewards. Names may collide; first match wins. Returns the granted
    /// (exp, coins) pair.
    pub fn complete_quest(&mut self, name: &str) -> Result<(i64, i64)> {
        let quest = self
            .quests
            .iter_mut()
            .find(|q| q.name == name && !q.completed)
            .ok_or(QuestsError::NoActiveQuestToComplete)?;
        quest.completed = true;
        let (exp, coins) = (quest.exp_reward, quest.coin_reward);
        self.player.grant(exp, coins);
        self.clamp_selection();
        Ok((exp, coins))
    }

    /// Remove the first active quest with the given name. Completed quests
    /// are never deletable.
    pub fn delete_quest(&mut self, name: &str) -> Result<()> {
        let idx = self
            .quests
            .iter()
            .position(|q| q.name == name && !q.completed)
            .ok_or(QuestsError::NoActiveQuestToDelete)?;
        self.quests.remove(idx);
        self.clamp_selection();
        Ok(())
    }

    /// Update the settings and persist immediately.
    pub fn apply_settings(&mut self, dark_theme: bool, font_size: u16) -> Result<()> {
        self.config.dark_theme = dark_theme;
        self.config.font_size = font_size;
        self.save()
    }

    /// Replace the annotations blob and persist immediately.
    pub fn update_annotations(&mut self, text: String) -> Result<()> {
        self.config.annotations = text;
        self.save()
    }

    /// Serialize the full state over the canonical data file.
    pub fn save(&self) -> Result<()> {
        self.storage.save(&SaveData {
            exp: self.player.total_exp,
            coins: self.player.total_coins,
            config: self.config.clone(),
            quests: self.quests.clone(),
        })
    }

    // --- derived views ---------------------------------------------------

    pub fn active_quests(&self) -> Vec<&Quest> {
        self.quests.iter().filter(|q| !q.completed).collect()
    }

    pub fn completed_quests(&self) -> Vec<&Quest> {
        self.quests.iter().filter(|q| q.completed).collect()
    }

    /// Name of the selected row of the active table, when the active tab is
    /// the one on screen.
    fn selected_active_name(&self) -> Option<String> {
        if self.tab != QuestTab::Active {
            return None;
        }
        let idx = self.active_state.selected()?;
        self.active_quests().get(idx).map(|q| q.name.clone())
    }

    // --- event plumbing --------------------------------------------------

    fn input(&mut self, ch: char) {
        match &mut self.mode {
            AppMode::Annotations(text) => text.push(ch),
            AppMode::Settings(_) => {}
            AppMode::Main => {
                if let Some(field) = self.form.field_mut(self.focus) {
                    field.push(ch);
                }
            }
        }
    }

    fn backspace(&mut self) {
        match &mut self.mode {
            AppMode::Annotations(text) => {
                text.pop();
            }
            AppMode::Settings(_) => {}
            AppMode::Main => {
                if let Some(field) = self.form.field_mut(self.focus) {
                    field.pop();
                }
            }
        }
    }

    fn submit(&mut self) {
        match &self.mode {
            AppMode::Main => {
                if self.focus.in_form() {
                    if let Err(e) = self.create_quest() {
                        self.popup = Some(Popup::error(e.to_string()));
                    }
                }
            }
            AppMode::Settings(draft) => {
                let draft = *draft;
                self.mode = AppMode::Main;
                if let Err(e) = self.apply_settings(draft.dark_theme, draft.font_size) {
                    error!("Falha ao salvar configurações: {e}");
                    self.popup = Some(Popup::error(e.to_string()));
                }
            }
            AppMode::Annotations(text) => {
                let text = text.clone();
                self.mode = AppMode::Main;
                if let Err(e) = self.update_annotations(text) {
                    error!("Falha ao salvar anotações: {e}");
                    self.popup = Some(Popup::error(e.to_string()));
                }
            }
        }
    }

    fn cancel(&mut self) {
        match self.mode {
            AppMode::Main => {
                if self.focus.in_form() {
                    self.focus = Focus::Quests;
                }
            }
            _ => self.mode = AppMode::Main,
        }
    }

    fn complete_selected(&mut self) {
        let result = match self.selected_active_name() {
            Some(name) => self
                .complete_quest(&name)
                .map(|(exp, coins)| (name, exp, coins)),
            None => Err(QuestsError::NoActiveQuestToComplete),
        };
        self.popup = Some(match result {
            Ok((name, exp, coins)) => Popup::info(format!(
                "Quest '{name}' completada! Ganhou {exp} EXP e {coins} moedas."
            )),
            Err(e) => Popup::error(e.to_string()),
        });
    }

    fn delete_selected(&mut self) {
        let result = match self.selected_active_name() {
            Some(name) => self.delete_quest(&name).map(|()| name),
            None => Err(QuestsError::NoActiveQuestToDelete),
        };
        self.popup = Some(match result {
            Ok(name) => Popup::info(format!("Quest '{name}' excluída.")),
            Err(e) => Popup::error(e.to_string()),
        });
    }

    fn move_cursor(&mut self, delta: i64) {
        if self.focus != Focus::Quests {
            return;
        }
        let len = match self.tab {
            QuestTab::Active => self.active_quests().len(),
            QuestTab::History => self.completed_quests().len(),
        };
        let state = match self.tab {
            QuestTab::Active => &mut self.active_state,
            QuestTab::History => &mut self.history_state,
        };
        if len == 0 {
            state.select(None);
            return;
        }
        let next = match state.selected() {
            Some(i) => (i as i64 + delta).clamp(0, len as i64 - 1) as usize,
            None => 0,
        };
        state.select(Some(next));
    }

    fn switch_tab(&mut self) {
        self.tab = match self.tab {
            QuestTab::Active => QuestTab::History,
            QuestTab::History => QuestTab::Active,
        };
    }

    /// Keep row selections inside their lists after a mutation.
    fn clamp_selection(&mut self) {
        let active_len = self.active_quests().len();
        match self.active_state.selected() {
            Some(_) if active_len == 0 => self.active_state.select(None),
            Some(i) if i >= active_len => self.active_state.select(Some(active_len - 1)),
            _ => {}
        }
        let history_len = self.completed_quests().len();
        match self.history_state.selected() {
            Some(_) if history_len == 0 => self.history_state.select(None),
            Some(i) if i >= history_len => self.history_state.select(Some(history_len - 1)),
            _ => {}
        }
    }
}
