//! 地址输入组件
//!
//! 文本输入触发防抖搜索并展示建议列表；经纬度输入代替地图标记，
//! 修改后触发反向地理编码。结果是否生效由 `AddressSync` 的序号决定。

use crate::http::FetchClient;
use crate::timer::{Debouncer, run_after};
use leptos::prelude::*;
use leptos::task::spawn_local;
use mealmatch_shared::ServiceConfig;
use mealmatch_shared::address::AddressSync;
use mealmatch_shared::geocode::{BLUR_HIDE_MS, DEBOUNCE_MS, Geocoder, Suggestion};
use mealmatch_shared::validation::parse_coordinates;

#[component]
pub fn AddressPicker(
    /// 地址文本与坐标
    sync: RwSignal<AddressSync>,
    #[prop(optional, into)] label: Option<String>,
) -> impl IntoView {
    let geocoder_url = StoredValue::new(ServiceConfig::from_build_env().geocoder_url);
    let debouncer = Debouncer::new(DEBOUNCE_MS);

    // 坐标输入的原始文本，允许中间态
    let lat_text = RwSignal::new(String::new());
    let lon_text = RwSignal::new(String::new());
    let location = Memo::new(move |_| sync.with(|s| s.location));
    Effect::new(move |_| {
        if let Some(loc) = location.get() {
            lat_text.set(loc.latitude.to_string());
            lon_text.set(loc.longitude.to_string());
        }
    });

    let on_input = move |ev| {
        let text = event_target_value(&ev);
        let mut ticket = None;
        sync.update(|s| ticket = s.type_text(&text));

        let Some(ticket) = ticket else {
            debouncer.cancel();
            return;
        };

        debouncer.schedule(move || {
            let base = geocoder_url.get_value();
            spawn_local(async move {
                let geocoder = Geocoder::new(FetchClient, &base);
                match geocoder.search(&text).await {
                    Ok(found) => {
                        sync.try_update(|s| s.apply_search(ticket, found));
                    }
                    Err(e) => log::warn!("address search failed: {}", e),
                }
            });
        });
    };

    let on_coordinates = move |_| {
        let Some(loc) = parse_coordinates(&lat_text.get_untracked(), &lon_text.get_untracked())
        else {
            sync.update(|s| s.clear_location());
            return;
        };
        let Some(ticket) = sync.try_update(|s| s.move_marker(loc)) else {
            return;
        };

        let base = geocoder_url.get_value();
        spawn_local(async move {
            let geocoder = Geocoder::new(FetchClient, &base);
            match geocoder.reverse(loc).await {
                Ok(name) => {
                    sync.try_update(|s| s.apply_reverse(ticket, name));
                }
                Err(e) => log::warn!("reverse geocoding failed: {}", e),
            }
        });
    };

    // 延迟收起，让建议项的点击先生效
    let on_blur = move |_| {
        run_after(BLUR_HIDE_MS, move || {
            sync.try_update(|s| s.hide_suggestions());
        });
    };

    let suggestion_item = move |suggestion: Suggestion| {
        let text = suggestion.display_name.clone();
        view! {
            <li>
                <a on:click=move |_| sync.update(|s| s.pick_suggestion(&suggestion))>{text}</a>
            </li>
        }
    };

    view! {
        <div class="form-control relative">
            <label class="label" for="address">
                <span class="label-text">{label.unwrap_or_else(|| "Address".to_string())}</span>
            </label>
            <input
                id="address"
                type="text"
                autocomplete="off"
                placeholder="Start typing an address"
                on:input=on_input
                on:blur=on_blur
                prop:value=move || sync.with(|s| s.text.clone())
                class="input input-bordered w-full"
                required
            />
            <Show when=move || sync.with(|s| s.show_suggestions)>
                <ul class="menu bg-base-100 rounded-box shadow-lg absolute top-full z-10 w-full">
                    <For
                        each=move || sync.with(|s| s.suggestions.clone())
                        key=|s| s.display_name.clone()
                        children=suggestion_item
                    />
                </ul>
            </Show>
        </div>

        <div class="grid grid-cols-2 gap-4">
            <div class="form-control">
                <label class="label" for="latitude">
                    <span class="label-text">"Latitude"</span>
                </label>
                <input
                    id="latitude"
                    type="text"
                    inputmode="decimal"
                    on:input=move |ev| lat_text.set(event_target_value(&ev))
                    on:change=on_coordinates
                    prop:value=lat_text
                    class="input input-bordered w-full"
                />
            </div>
            <div class="form-control">
                <label class="label" for="longitude">
                    <span class="label-text">"Longitude"</span>
                </label>
                <input
                    id="longitude"
                    type="text"
                    inputmode="decimal"
                    on:input=move |ev| lon_text.set(event_target_value(&ev))
                    on:change=on_coordinates
                    prop:value=lon_text
                    class="input input-bordered w-full"
                />
            </div>
        </div>
    }
}
