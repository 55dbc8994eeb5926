use yew::prelude::*;

use super::{icon_plus, icon_trash, page_shell};
use crate::app::Controller;
use crate::dispatch::Command;
use crate::hierarchy::{account_kind_options, config_view, ConfigItem, RowMode};
use crate::model::{AccountKind, Id};
use crate::state::ConfigRowKey;

const LIST_CLASS: &str = "bg-card rounded-[10px] border border-border p-4 flex flex-col gap-3";
const FIELD_CLASS: &str = "flex-1 bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[13px] text-[#173E63] border-none";

/// Delete control of one row: the trash icon, or "Apagar? Sim / Não".
fn delete_control(controller: &Controller, key: ConfigRowKey, mode: RowMode) -> Html {
    match mode {
        RowMode::Normal => {
            let controller = controller.clone();
            html! {
                <button type="button" class="text-red-600" aria-label="Apagar" onclick={Callback::from(move |e: MouseEvent| {
                    e.stop_propagation();
                    controller.send(Command::AskConfigDelete(key));
                })}>{ icon_trash() }</button>
            }
        }
        RowMode::ConfirmDelete => {
            let on_yes = {
                let controller = controller.clone();
                Callback::from(move |e: MouseEvent| {
                    e.stop_propagation();
                    controller.send(Command::ConfirmConfigDelete);
                })
            };
            let on_no = {
                let controller = controller.clone();
                Callback::from(move |e: MouseEvent| {
                    e.stop_propagation();
                    controller.send(Command::CancelConfigDelete);
                })
            };
            html! {
                <span class="flex items-center gap-2 text-[12px]">
                    <span class="text-red-600 font-bold">{"Apagar?"}</span>
                    <button type="button" onclick={on_yes} class="px-2 py-0.5 rounded bg-red-600 text-white">{"Sim"}</button>
                    <button type="button" onclick={on_no} class="px-2 py-0.5 rounded border border-border">{"Não"}</button>
                </span>
            }
        }
    }
}

fn item_list(
    controller: &Controller,
    items: &[ConfigItem],
    on_pick: Option<fn(Id) -> Command>,
) -> Html {
    html! {
        <ul class="divide-y divide-border">
            { for items.iter().map(|item| {
                let class_name = if item.active {
                    "flex items-center justify-between px-3 py-2 rounded-lg bg-[#B2CBDE] text-[#173E63] font-bold cursor-pointer"
                } else {
                    "flex items-center justify-between px-3 py-2 rounded-lg hover:bg-slate-50 cursor-pointer"
                };
                let onclick = on_pick.map(|pick| {
                    let controller = controller.clone();
                    let id = item.id;
                    Callback::from(move |_: MouseEvent| controller.send(pick(id)))
                });
                html! {
                    <li class={class_name} {onclick}>
                        <span>{ item.label.clone() }</span>
                        {
                            match item.key {
                                Some(key) => delete_control(controller, key, item.mode),
                                None => html! {},
                            }
                        }
                    </li>
                }
            }) }
        </ul>
    }
}

fn name_form(
    value: &UseStateHandle<String>,
    placeholder: &'static str,
    on_add: Callback<MouseEvent>,
) -> Html {
    let oninput = {
        let value = value.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            value.set(input.value());
        })
    };
    html! {
        <div class="flex items-center gap-2">
            <input type="text" placeholder={placeholder} value={(**value).clone()} {oninput} class={FIELD_CLASS} />
            <button type="button" onclick={on_add} class="p-2 rounded-lg bg-[#173E63] text-white" aria-label="Adicionar">{ icon_plus() }</button>
        </div>
    }
}

#[function_component(ConfigPage)]
pub fn config_page() -> Html {
    let controller = use_context::<Controller>();
    let subtype_name = use_state(String::new);
    let category_name = use_state(String::new);
    let account_name = use_state(String::new);
    let account_kind = use_state(|| AccountKind::Bank);
    let Some(controller) = controller else {
        return html! {};
    };

    let view = config_view(&controller.state.borrow());

    let add = |make: fn(String) -> Command, field: &UseStateHandle<String>| {
        let controller = controller.clone();
        let field = field.clone();
        Callback::from(move |_: MouseEvent| {
            controller.send(make((*field).clone()));
            field.set(String::new());
        })
    };
    let on_add_account = {
        let controller = controller.clone();
        let account_name = account_name.clone();
        let account_kind = account_kind.clone();
        Callback::from(move |_: MouseEvent| {
            controller.send(Command::AddAccount {
                name: (*account_name).clone(),
                kind: *account_kind,
            });
            account_name.set(String::new());
        })
    };
    let on_kind = {
        let account_kind = account_kind.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
            account_kind.set(AccountKind::from_wire_name(&input.value()));
        })
    };

    html! {
        { page_shell(
            "Configurações",
            html! {},
            html! {
                <>
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                        <div class={LIST_CLASS}>
                            <h2 class="text-lg font-bold text-foreground">{"Tipos"}</h2>
                            { item_list(&controller, &view.types, Some(Command::SelectType as fn(Id) -> Command)) }
                        </div>

                        <div class={LIST_CLASS}>
                            <h2 class="text-lg font-bold text-foreground">{ format!("Subtipos de: {}", view.selected_type_label) }</h2>
                            {
                                match &view.subtypes {
                                    Some(items) => html! {
                                        <>
                                            { item_list(&controller, items, Some(Command::SelectSubtype as fn(Id) -> Command)) }
                                            { name_form(&subtype_name, "Novo subtipo", add(|name| Command::AddSubtype { name }, &subtype_name)) }
                                        </>
                                    },
                                    None => html! { <p class="text-sm text-muted-foreground">{"Selecione um Tipo."}</p> },
                                }
                            }
                        </div>

                        <div class={LIST_CLASS}>
                            <h2 class="text-lg font-bold text-foreground">{ format!("Categorias de: {}", view.selected_subtype_label) }</h2>
                            {
                                match &view.categories {
                                    Some(items) => html! {
                                        <>
                                            { item_list(&controller, items, None) }
                                            { name_form(&category_name, "Nova categoria", add(|name| Command::AddCategory { name }, &category_name)) }
                                        </>
                                    },
                                    None => html! { <p class="text-sm text-muted-foreground">{"Selecione um Subtipo."}</p> },
                                }
                            }
                        </div>
                    </div>

                    <div class={LIST_CLASS}>
                        <h2 class="text-lg font-bold text-foreground">{"Contas"}</h2>
                        <ul class="divide-y divide-border">
                            { for view.accounts.iter().map(|account| html! {
                                <li class="flex items-center justify-between px-3 py-2">
                                    <span>
                                        { format!("{} {}", account.icon, account.name) }
                                        <span class="ml-2 text-[11px] text-muted-foreground uppercase">{ account.kind_label }</span>
                                    </span>
                                    { delete_control(&controller, account.key, account.mode) }
                                </li>
                            }) }
                        </ul>
                        <div class="flex items-center gap-2">
                            { name_form(&account_name, "Nova conta", on_add_account) }
                            <select onchange={on_kind} class="bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[13px] text-[#173E63] border-none">
                                { for account_kind_options().into_iter().map(|(kind, label)| html! {
                                    <option value={kind.wire_name()} selected={kind == *account_kind}>{ label }</option>
                                }) }
                            </select>
                        </div>
                    </div>
                </>
            }
        ) }
    }
}
