//! Yew components: the page shell and one module per page.

mod config;
mod due_items;
mod maintenance;
mod planning;
mod transactions;

pub use config::ConfigPage;
pub use due_items::DueItemsPage;
pub use maintenance::MaintenancePage;
pub use planning::PlanningPage;
pub use transactions::TransactionsPage;

use rust_decimal::Decimal;
use yew::prelude::*;

use crate::app::Controller;
use crate::dispatch::Command;
use crate::hierarchy::SelectOption;
use crate::model::Id;
use crate::money::format_currency;
use crate::settings::AppSettings;
use crate::state::{Dialog, PendingDelete};

#[derive(Clone, Copy, PartialEq)]
pub enum Page {
    Transactions,
    Config,
    DueItems,
    Planning,
    Maintenance,
}

#[derive(Clone, Copy, PartialEq)]
pub enum StatIcon {
    UpRight,
    DownRight,
    Wallet,
    CreditCard,
    Scale,
}

/// Settings from context, or the defaults when rendered outside the app.
fn current_settings(settings: &Option<UseStateHandle<AppSettings>>) -> AppSettings {
    settings
        .as_ref()
        .map(|s| (**s).clone())
        .unwrap_or_default()
}

fn parse_id(raw: &str) -> Option<Id> {
    raw.trim().parse().ok()
}

fn select_options(options: &[SelectOption], selected: Option<Id>) -> Html {
    html! {
        { for options.iter().map(|o| html! {
            <option value={o.id.to_string()} selected={selected == Some(o.id)}>{ o.label.clone() }</option>
        }) }
    }
}

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
    pub active_page: Page,
    pub on_select: Callback<Page>,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    html! {
        <div class="flex h-screen bg-background">
            <div class="hidden md:flex">
                <Sidebar active_page={props.active_page} on_select={props.on_select.clone()} />
            </div>

            <div class="flex-1 flex flex-col overflow-hidden">
                <main class="flex-1 overflow-y-auto">
                    { for props.children.iter() }
                </main>
                <ConfirmDeleteDialog />
            </div>
        </div>
    }
}

struct NavItem {
    label: &'static str,
    page: Page,
    icon: fn() -> Html,
}

#[derive(Properties, PartialEq)]
struct SidebarProps {
    active_page: Page,
    on_select: Callback<Page>,
}

#[function_component(Sidebar)]
fn sidebar(props: &SidebarProps) -> Html {
    let nav_items = [
        NavItem {
            label: "Lançamentos",
            page: Page::Transactions,
            icon: icon_layout_grid,
        },
        NavItem {
            label: "Configurações",
            page: Page::Config,
            icon: icon_settings,
        },
        NavItem {
            label: "Vencimentos",
            page: Page::DueItems,
            icon: icon_calendar,
        },
        NavItem {
            label: "Planejamento",
            page: Page::Planning,
            icon: icon_bar_chart,
        },
        NavItem {
            label: "Manutenção",
            page: Page::Maintenance,
            icon: icon_database,
        },
    ];

    html! {
        <div class="w-[220px] h-screen bg-[#D8E1E8] p-4 flex flex-col">
            <div class="flex items-center gap-3 px-2 mb-8">
                <span class="text-[#173E63] text-2xl font-black tracking-tight">{"Financeiro"}</span>
            </div>

            <div class="flex-1 bg-[#173E63] rounded-[24px] flex flex-col py-6 px-3 shadow-lg">
                <nav class="flex-1 space-y-2">
                    { for nav_items.iter().map(|item| {
                        let class_name = if item.page == props.active_page {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium bg-[#B2CBDE] text-[#173E63] w-full"
                        } else {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium text-slate-300 hover:bg-white/5 hover:text-white w-full"
                        };
                        let on_select = props.on_select.clone();
                        let page = item.page;

                        html! {
                            <button type="button" class={class_name} onclick={Callback::from(move |_| on_select.emit(page))}>
                                <span class="shrink-0">{ (item.icon)() }</span>
                                <span class="truncate whitespace-nowrap text-left">{ item.label }</span>
                            </button>
                        }
                    }) }
                </nav>
            </div>
        </div>
    }
}

fn page_shell(title: &'static str, actions: Html, children: Html) -> Html {
    html! {
        <div class="p-6 max-w-7xl mx-auto">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <h1 class="text-2xl font-bold text-foreground">{ title }</h1>
                { actions }
            </div>
            <div class="pt-5 space-y-6">
                { children }
            </div>
        </div>
    }
}

/// A floating panel drawn over the page while a dialog is open.
fn dialog_panel(title: &'static str, on_close: Callback<MouseEvent>, children: Html) -> Html {
    html! {
        <div class="fixed inset-0 bg-black/30 flex items-center justify-center z-50">
            <div class="bg-white rounded-[10px] shadow-lg w-full max-w-lg p-6">
                <div class="flex items-center justify-between mb-4">
                    <h4 class="text-[#1D617A] font-bold text-[15px] tracking-wider">{ title }</h4>
                    <button type="button" class="text-slate-400 hover:text-slate-600" onclick={on_close}>{"✕"}</button>
                </div>
                { children }
            </div>
        </div>
    }
}

/// The shared "are you sure?" dialog for transaction and due item deletes.
#[function_component(ConfirmDeleteDialog)]
fn confirm_delete_dialog() -> Html {
    let controller = use_context::<Controller>();
    let Some(controller) = controller else {
        return html! {};
    };
    let (open, pending) = {
        let state = controller.state.borrow();
        (state.dialog == Some(Dialog::ConfirmDelete), state.pending_delete)
    };
    if !open {
        return html! {};
    }
    let what = match pending {
        Some(PendingDelete::Transaction(_)) => "este lançamento",
        Some(PendingDelete::DueItem(_)) => "este vencimento",
        None => "este item",
    };
    let on_cancel = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| controller.send(Command::CancelPendingDelete))
    };
    let on_confirm = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| controller.send(Command::ConfirmPendingDelete))
    };

    dialog_panel(
        "Confirmar exclusão",
        on_cancel.clone(),
        html! {
            <>
                <p class="text-sm text-slate-600 mb-6">{ format!("Deseja realmente apagar {}?", what) }</p>
                <div class="flex justify-end gap-3">
                    <button type="button" onclick={on_cancel} class="px-4 py-2 rounded-lg border border-border text-sm">{"Cancelar"}</button>
                    <button type="button" onclick={on_confirm} class="px-4 py-2 rounded-lg bg-red-600 text-white text-sm font-bold">{"Apagar"}</button>
                </div>
            </>
        },
    )
}

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: &'static str,
    pub amount: Decimal,
    pub icon: StatIcon,
    pub currency_symbol: String,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="bg-card p-6 rounded-[10px] shadow-sm border border-border flex justify-between items-start">
            <div>
                <p class="text-muted-foreground text-[10px] font-bold mb-1 tracking-widest">{ props.title }</p>
                <h3 class="text-2xl font-bold text-[#1D617A] tracking-tight">{ format_currency(props.amount, &props.currency_symbol) }</h3>
            </div>
            <div class="p-3 bg-[#eef4f9] rounded-[10px]">
                {
                    match props.icon {
                        StatIcon::UpRight => icon_arrow_up_right(),
                        StatIcon::DownRight => icon_arrow_down_right(),
                        StatIcon::Wallet => icon_wallet(),
                        StatIcon::CreditCard => icon_credit_card(),
                        StatIcon::Scale => icon_scale(),
                    }
                }
            </div>
        </div>
    }
}

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" class="text-foreground">
            <path d={path}></path>
        </svg>
    }
}

fn icon_layout_grid() -> Html {
    icon_base("M3 3h8v8H3zM13 3h8v8h-8zM3 13h8v8H3zM13 13h8v8h-8z")
}
fn icon_wallet() -> Html {
    icon_base("M3 7h18v10H3zM16 7V5H5v2")
}
fn icon_credit_card() -> Html {
    icon_base("M3 7h18v10H3zM3 11h18")
}
fn icon_bar_chart() -> Html {
    icon_base("M4 20V10M10 20V4M16 20v-6M22 20H2")
}
fn icon_settings() -> Html {
    icon_base("M12 1v3M12 20v3M4.2 4.2l2.1 2.1M17.7 17.7l2.1 2.1M1 12h3M20 12h3M4.2 19.8l2.1-2.1M17.7 6.3l2.1-2.1")
}
fn icon_calendar() -> Html {
    icon_base("M3 5h18v16H3zM16 3v4M8 3v4M3 10h18")
}
fn icon_database() -> Html {
    icon_base("M4 6c0-1.7 3.6-3 8-3s8 1.3 8 3-3.6 3-8 3-8-1.3-8-3zM4 6v12c0 1.7 3.6 3 8 3s8-1.3 8-3V6M4 12c0 1.7 3.6 3 8 3s8-1.3 8-3")
}
fn icon_scale() -> Html {
    icon_base("M12 3v18M5 7h14M5 7l-3 7h6zM19 7l-3 7h6z")
}
fn icon_plus() -> Html {
    icon_base("M12 5v14M5 12h14")
}
fn icon_trash() -> Html {
    icon_base("M3 6h18M8 6V4h8v2M6 6l1 14h10l1-14")
}
fn icon_arrow_up_right() -> Html {
    icon_base("M7 17L17 7M7 7h10v10")
}
fn icon_arrow_down_right() -> Html {
    icon_base("M7 7l10 10M17 7v10H7")
}
