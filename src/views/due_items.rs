use yew::prelude::*;

use super::{dialog_panel, icon_plus, icon_trash, page_shell};
use crate::app::Controller;
use crate::dispatch::{Command, DueItemForm};
use crate::due::{due_view, Reminders};
use crate::model::DueKind;
use crate::state::Dialog;

const FIELD_CLASS: &str = "w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[13px] text-[#173E63] border-none";

fn reminder_list(title: &'static str, reminders: &Reminders) -> Html {
    html! {
        <div class="bg-card rounded-[10px] border border-border p-4">
            <h4 class="text-sm font-bold text-foreground mb-2">{ title }</h4>
            {
                if reminders.is_empty() {
                    html! { <p class="text-[12px] text-muted-foreground">{"Nada por aqui."}</p> }
                } else {
                    html! {
                        <ul class="text-[13px] space-y-1">
                            { for reminders.fixed.iter().map(|line| html! { <li>{ format!("• {}", line) }</li> }) }
                            { for reminders.dated.iter().map(|line| html! { <li>{ format!("• {}", line) }</li> }) }
                        </ul>
                    }
                }
            }
        </div>
    }
}

#[function_component(DueItemsPage)]
pub fn due_items_page() -> Html {
    let controller = use_context::<Controller>();
    let Some(controller) = controller else {
        return html! {};
    };

    let (view, dialog) = {
        let state = controller.state.borrow();
        (due_view(&state.due_items, state.today), state.dialog)
    };

    let on_new = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            controller.send(Command::OpenDialog(Dialog::NewDueItem))
        })
    };

    html! {
        { page_shell(
            "Vencimentos",
            html! {
                <button type="button" onclick={on_new} class="flex items-center gap-2 px-4 py-2 rounded-lg bg-[#173E63] text-white text-sm font-bold">
                    { icon_plus() }
                    <span>{"Novo vencimento"}</span>
                </button>
            },
            html! {
                <>
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                        { for view.windows.iter().map(|(window, reminders)| reminder_list(window.title(), reminders)) }
                    </div>

                    <div class="bg-card rounded-[10px] border border-border overflow-x-auto">
                        <table class="w-full text-sm">
                            <thead class="text-left text-[11px] uppercase tracking-wider text-muted-foreground border-b border-border">
                                <tr>
                                    <th class="px-3 py-2">{"Descrição"}</th>
                                    <th class="px-3 py-2">{"Tipo"}</th>
                                    <th class="px-3 py-2">{"Vencimento"}</th>
                                    <th class="px-3 py-2">{"Ativo"}</th>
                                    <th class="px-3 py-2"></th>
                                </tr>
                            </thead>
                            <tbody class="divide-y divide-border">
                                { for view.rows.iter().map(|row| {
                                    let id = row.id;
                                    let on_toggle = {
                                        let controller = controller.clone();
                                        Callback::from(move |_: Event| controller.send(Command::ToggleDueItem(id)))
                                    };
                                    let on_delete = {
                                        let controller = controller.clone();
                                        Callback::from(move |_: MouseEvent| controller.send(Command::AskDeleteDueItem(id)))
                                    };
                                    html! {
                                        <tr>
                                            <td class="px-3 py-2">{ row.description.clone() }</td>
                                            <td class="px-3 py-2">{ row.kind.to_string() }</td>
                                            <td class="px-3 py-2">{ row.schedule.clone() }</td>
                                            <td class="px-3 py-2"><input type="checkbox" role="switch" checked={row.active} onchange={on_toggle} /></td>
                                            <td class="px-3 py-2">
                                                <button type="button" onclick={on_delete} class="text-red-600" aria-label="Apagar">{ icon_trash() }</button>
                                            </td>
                                        </tr>
                                    }
                                }) }
                            </tbody>
                        </table>
                    </div>

                    {
                        if dialog == Some(Dialog::NewDueItem) {
                            html! { <DueItemDialog /> }
                        } else {
                            html! {}
                        }
                    }
                </>
            }
        ) }
    }
}

#[function_component(DueItemDialog)]
fn due_item_dialog() -> Html {
    let controller = use_context::<Controller>();
    let description = use_state(String::new);
    let kind = use_state(|| DueKind::Fixed);
    let day = use_state(String::new);
    let date = use_state(String::new);
    let Some(controller) = controller else {
        return html! {};
    };

    let setter = |handle: &UseStateHandle<String>| {
        let handle = handle.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            handle.set(input.value());
        })
    };
    let on_kind = {
        let kind = kind.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
            kind.set(if input.value() == DueKind::Dated.wire_name() {
                DueKind::Dated
            } else {
                DueKind::Fixed
            });
        })
    };
    let on_close = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| controller.send(Command::CloseDialog))
    };
    let on_save = {
        let controller = controller.clone();
        let (description, kind, day, date) =
            (description.clone(), kind.clone(), day.clone(), date.clone());
        Callback::from(move |_: MouseEvent| {
            controller.send(Command::AddDueItem(DueItemForm {
                description: (*description).clone(),
                kind: *kind,
                day: (*day).clone(),
                date: (*date).clone(),
            }))
        })
    };

    dialog_panel(
        "Novo vencimento",
        on_close,
        html! {
            <div class="grid grid-cols-2 gap-3">
                <div class="space-y-1 col-span-2">
                    <label class="text-[12px] font-bold text-muted-foreground">{"Descrição"}</label>
                    <input type="text" value={(*description).clone()} oninput={setter(&description)} class={FIELD_CLASS} />
                </div>
                <div class="space-y-1">
                    <label class="text-[12px] font-bold text-muted-foreground">{"Tipo"}</label>
                    <select onchange={on_kind} class={FIELD_CLASS}>
                        <option value={DueKind::Fixed.wire_name()} selected={*kind == DueKind::Fixed}>{"Fixo (todo mês)"}</option>
                        <option value={DueKind::Dated.wire_name()} selected={*kind == DueKind::Dated}>{"Data específica"}</option>
                    </select>
                </div>
                {
                    match *kind {
                        DueKind::Fixed => html! {
                            <div class="space-y-1">
                                <label class="text-[12px] font-bold text-muted-foreground">{"Dia"}</label>
                                <input type="number" min="1" max="31" value={(*day).clone()} oninput={setter(&day)} class={FIELD_CLASS} />
                            </div>
                        },
                        DueKind::Dated => html! {
                            <div class="space-y-1">
                                <label class="text-[12px] font-bold text-muted-foreground">{"Data"}</label>
                                <input type="date" value={(*date).clone()} oninput={setter(&date)} class={FIELD_CLASS} />
                            </div>
                        },
                        DueKind::Other => html! {},
                    }
                }
                <div class="col-span-2 flex justify-end pt-2">
                    <button type="button" onclick={on_save} class="px-4 py-2 rounded-lg bg-[#173E63] text-white text-sm font-bold">{"Salvar"}</button>
                </div>
            </div>
        },
    )
}
