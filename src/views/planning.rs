use rust_decimal::Decimal;
use yew::prelude::*;

use super::page_shell;
use crate::app::Controller;
use crate::dispatch::Command;
use crate::money::format_plain;
use crate::planning::{planning_view, PlanningRow, MONTH_LABELS};

fn cell(value: Decimal) -> String {
    if value.is_zero() {
        "-".to_string()
    } else {
        format_plain(value)
    }
}

fn row_cells(row: &PlanningRow) -> Html {
    html! {
        <>
            { for row.months.iter().map(|v| html! { <td class="px-2 py-1 text-right">{ cell(*v) }</td> }) }
            <td class="px-2 py-1 text-right font-bold">{ cell(row.total) }</td>
        </>
    }
}

#[function_component(PlanningPage)]
pub fn planning_page() -> Html {
    let controller = use_context::<Controller>();

    {
        let controller = controller.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(controller) = controller {
                    let year = controller.state.borrow().filters.planning_year;
                    controller.send(Command::SetPlanningYear(year));
                }
                || ()
            },
            (),
        );
    }

    let Some(controller) = controller else {
        return html! {};
    };

    let (year, years, view) = {
        let state = controller.state.borrow();
        let year = state.filters.planning_year;
        (
            year,
            state.years.clone(),
            state.planning.as_ref().map(|tree| planning_view(year, tree)),
        )
    };

    let on_year = {
        let controller = controller.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlSelectElement = e.target_unchecked_into();
            if let Ok(year) = input.value().parse() {
                controller.send(Command::SetPlanningYear(year));
            }
        })
    };

    let mut year_choices = years;
    if !year_choices.contains(&year) {
        year_choices.push(year);
    }

    html! {
        { page_shell(
            "Planejamento",
            html! {
                <select onchange={on_year} class="bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[13px] text-[#173E63] border-none">
                    { for year_choices.iter().map(|y| html! {
                        <option value={y.to_string()} selected={*y == year}>{ y.to_string() }</option>
                    }) }
                </select>
            },
            match view {
                None => html! { <p class="text-sm text-muted-foreground">{"Carregando..."}</p> },
                Some(view) => html! {
                    <div class="bg-card rounded-[10px] border border-border overflow-x-auto">
                        <table class="w-full text-[12px]">
                            <thead class="border-b border-border text-muted-foreground">
                                <tr>
                                    <th class="px-2 py-1 text-left">{ format!("Categoria ({})", view.year) }</th>
                                    { for MONTH_LABELS.iter().map(|m| html! { <th class="px-2 py-1 text-right">{ *m }</th> }) }
                                    <th class="px-2 py-1 text-right">{"Total"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                { for view.sections.iter().map(|section| html! {
                                    <>
                                        <tr class={section.tone.css()}>
                                            <td colspan="14" class="px-2 py-1 font-bold uppercase">{ section.type_name.clone() }</td>
                                        </tr>
                                        { for section.groups.iter().map(|group| html! {
                                            <>
                                                <tr>
                                                    <td colspan="14" class="px-4 py-1 font-bold text-[#173E63]">{ group.subtype.clone() }</td>
                                                </tr>
                                                { for group.rows.iter().map(|row| html! {
                                                    <tr>
                                                        <td class="px-6 py-1">{ row.label.clone() }</td>
                                                        { row_cells(row) }
                                                    </tr>
                                                }) }
                                            </>
                                        }) }
                                        <tr class={classes!(section.tone.css(), "font-bold")}>
                                            <td class="px-2 py-1">{ section.totals.label.clone() }</td>
                                            { row_cells(&section.totals) }
                                        </tr>
                                    </>
                                }) }
                                <tr class="border-t-2 border-border font-bold">
                                    <td class="px-2 py-1">{ view.balance.label.clone() }</td>
                                    { row_cells(&view.balance) }
                                </tr>
                            </tbody>
                        </table>
                    </div>
                },
            }
        ) }
    }
}
