use std::cell::RefCell;
use std::rc::Rc;

use futures_util::future::{join, join3};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::Gateway;
use crate::dispatch::{dispatch, settle, Command, Effects, Reload, Settlement};
use crate::settings::{load_settings, AppSettings};
use crate::state::AppState;
use crate::views::{
    ConfigPage, DueItemsPage, Layout, MaintenancePage, Page, PlanningPage, TransactionsPage,
};

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

fn reload_page() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().reload();
    }
}

/// Shared handle the pages use to read state and send commands.
///
/// `revision` is bumped on every redraw so that context consumers see a new
/// value and render again.
#[derive(Clone)]
pub struct Controller {
    pub state: Rc<RefCell<AppState>>,
    gateway: Gateway,
    redraw: Callback<()>,
    revision: u64,
}

impl PartialEq for Controller {
    fn eq(&self, other: &Self) -> bool {
        self.revision == other.revision
            && Rc::ptr_eq(&self.state, &other.state)
            && self.gateway == other.gateway
    }
}

impl Controller {
    /// Runs a command against the state, then sends whatever it asked for.
    pub fn send(&self, command: Command) {
        let outcome = dispatch(&mut self.state.borrow_mut(), command);
        match outcome {
            Ok(effects) => {
                self.redraw.emit(());
                if !effects.requests.is_empty() || effects.reload != Reload::Nothing {
                    let this = self.clone();
                    spawn_local(async move { this.run(effects).await });
                }
            }
            Err(err) => alert(&err.to_string()),
        }
    }

    async fn run(self, effects: Effects) {
        if !effects.requests.is_empty() {
            let results = self.gateway.submit_all(&effects.requests).await;
            let settlement = settle(&effects.requests, results);
            match &settlement {
                Settlement::Completed(messages) => {
                    log::info!("{} request(s) completed", messages.len());
                    if effects.close_dialog {
                        self.state.borrow_mut().dialog = None;
                    }
                    if effects.reload == Reload::Page {
                        let msg = messages
                            .iter()
                            .find_map(|m| m.msg.clone())
                            .unwrap_or_else(|| "Operação concluída.".to_string());
                        alert(&format!("✅ {}", msg));
                        reload_page();
                        return;
                    }
                    if let Some(notice) = &effects.notice {
                        alert(notice);
                    }
                }
                Settlement::Partial(err) => {
                    log::warn!("{}", err);
                    alert(&err.to_string());
                }
                Settlement::Failed(err) => {
                    log::error!("{}", err);
                    if effects.reload == Reload::Page {
                        alert(&format!("❌ Erro: {}", err));
                    } else {
                        alert(&err.to_string());
                    }
                }
            }
            if !settlement.changed_data() {
                return;
            }
        }
        self.reload(effects.reload).await;
    }

    async fn reload(&self, reload: Reload) {
        match reload {
            Reload::Nothing => return,
            Reload::Page => {
                reload_page();
                return;
            }
            Reload::Startup => {
                let (snapshot, years, due) = join3(
                    self.gateway.load_snapshot(),
                    self.gateway.load_years(),
                    self.gateway.load_due_items(),
                )
                .await;
                let mut state = self.state.borrow_mut();
                match snapshot {
                    Ok(snapshot) => state.replace_snapshot(snapshot),
                    Err(e) => log::error!("loading data: {}", e),
                }
                match years {
                    Ok(years) => state.set_years(years),
                    Err(e) => log::error!("loading years: {}", e),
                }
                match due {
                    Ok(items) => state.due_items = items,
                    Err(e) => log::error!("loading due items: {}", e),
                }
            }
            Reload::Snapshot => {
                let (snapshot, years) =
                    join(self.gateway.load_snapshot(), self.gateway.load_years()).await;
                let refresh_planning = {
                    let mut state = self.state.borrow_mut();
                    match snapshot {
                        Ok(snapshot) => state.replace_snapshot(snapshot),
                        Err(e) => log::error!("reloading data: {}", e),
                    }
                    if let Ok(years) = years {
                        state.set_years(years);
                    }
                    state.planning.is_some()
                };
                if refresh_planning {
                    self.load_planning().await;
                }
            }
            Reload::DueItems => match self.gateway.load_due_items().await {
                Ok(items) => self.state.borrow_mut().due_items = items,
                Err(e) => log::error!("reloading due items: {}", e),
            },
            Reload::Planning => self.load_planning().await,
        }
        log::info!("reloaded {:?}", reload);
        self.redraw.emit(());
    }

    async fn load_planning(&self) {
        let year = self.state.borrow().filters.planning_year;
        match self.gateway.load_planning(year).await {
            Ok(tree) => self.state.borrow_mut().planning = Some(tree),
            Err(e) => log::error!("loading planning for {}: {}", year, e),
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let active_page = use_state(|| Page::Transactions);
    let settings = use_state(load_settings);
    let state = use_mut_ref(|| AppState::new(chrono::Local::now().date_naive()));
    let revision = use_mut_ref(|| 0u64);
    let force_update = use_force_update();

    let on_select = {
        let active_page = active_page.clone();
        Callback::from(move |page: Page| active_page.set(page))
    };

    let controller = Controller {
        state,
        gateway: Gateway::new((*settings).clone()),
        redraw: {
            let revision = revision.clone();
            Callback::from(move |_| {
                *revision.borrow_mut() += 1;
                force_update.force_update();
            })
        },
        revision: *revision.borrow(),
    };

    {
        let controller = controller.clone();
        use_effect_with_deps(
            move |_| {
                controller.send(Command::Initialize);
                || ()
            },
            (*settings).api_base_url.clone(),
        );
    }

    let content = match *active_page {
        Page::Transactions => html! { <TransactionsPage /> },
        Page::Config => html! { <ConfigPage /> },
        Page::DueItems => html! { <DueItemsPage /> },
        Page::Planning => html! { <PlanningPage /> },
        Page::Maintenance => html! { <MaintenancePage /> },
    };

    html! {
        <ContextProvider<UseStateHandle<AppSettings>> context={settings}>
            <ContextProvider<Controller> context={controller}>
                <Layout active_page={*active_page} on_select={on_select}>
                    { content }
                </Layout>
            </ContextProvider<Controller>>
        </ContextProvider<UseStateHandle<AppSettings>>>
    }
}
