//! Plain-text rendering of items and store state.

use std::fmt::Write;

use larder_core::{Item, Paginator};
use larder_sync::StoreState;

/// One line per item: id, name, rating, price, restaurant.
pub fn item_line(item: &Item) -> String {
    let rating = if item.rating > 0.0 {
        format!("{:.1}", item.rating)
    } else {
        "-".to_string()
    };

    let mut line = format!("{:>6}  {:<28} {:>4}  ${}", item.id, item.name, rating, item.price);
    if let Some(restaurant) = &item.restaurant {
        let _ = write!(line, "  @ {} ({})", restaurant.name, restaurant.status);
    }
    line
}

/// The revealed page(s) of `items`, with a hint when more are hidden.
pub fn item_list(items: &[Item], pager: &Paginator) -> String {
    if items.is_empty() {
        return "No food items found.\n".to_string();
    }

    let mut out = String::new();
    for item in pager.visible(items) {
        out.push_str(&item_line(item));
        out.push('\n');
    }
    if pager.has_more(items.len()) {
        let _ = writeln!(
            out,
            "... showing {} of {} items",
            pager.visible_count(),
            items.len()
        );
    }
    out
}

/// Multi-line detail view of one item.
pub fn item_detail(item: &Item) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "id:         {}", item.id);
    let _ = writeln!(out, "name:       {}", item.name);
    let _ = writeln!(out, "image:      {}", item.image);
    let _ = writeln!(out, "rating:     {}", item.rating);
    let _ = writeln!(out, "price:      ${}", item.price);
    match &item.restaurant {
        Some(r) => {
            let _ = writeln!(out, "restaurant: {} ({})", r.name, r.status);
            let _ = writeln!(out, "logo:       {}", r.logo);
        }
        None => {
            let _ = writeln!(out, "restaurant: -");
        }
    }
    out
}

/// Everything the list view shows for a snapshot.
pub fn state_view(state: &StoreState, pager: &Paginator) -> String {
    if state.is_loading {
        return "Loading...\n".to_string();
    }
    let mut out = String::new();
    if let Some(error) = &state.error {
        let _ = writeln!(out, "error: {error}");
    }
    out.push_str(&item_list(&state.items, pager));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use larder_core::{Restaurant, RestaurantStatus};

    fn item(id: &str, rating: f64) -> Item {
        Item {
            id: id.into(),
            created_at: String::new(),
            name: format!("Dish {id}"),
            image: String::new(),
            rating,
            price: "9.50".into(),
            restaurant: None,
        }
    }

    #[test]
    fn test_item_line() {
        let mut pho = item("3", 4.5);
        pho.restaurant = Some(Restaurant {
            name: "Saigon".into(),
            logo: "https://img.example/s.png".into(),
            status: RestaurantStatus::Open,
        });
        let line = item_line(&pho);
        assert!(line.contains("Dish 3"));
        assert!(line.contains(" 4.5  "));
        assert!(line.contains("$9.50"));
        assert!(line.ends_with("@ Saigon (Open)"));

        assert!(item_line(&item("4", 0.0)).contains(" -  $9.50"));
    }

    #[test]
    fn test_item_list_pages() {
        let items: Vec<Item> = (0..10).map(|i| item(&i.to_string(), 3.0)).collect();
        let mut pager = Paginator::new(8);

        let out = item_list(&items, &pager);
        assert_eq!(out.lines().count(), 9);
        assert!(out.ends_with("... showing 8 of 10 items\n"));

        pager.load_more();
        let out = item_list(&items, &pager);
        assert_eq!(out.lines().count(), 10);
    }

    #[test]
    fn test_state_view() {
        let pager = Paginator::default();
        let mut state = StoreState {
            is_loading: true,
            ..StoreState::default()
        };
        assert_eq!(state_view(&state, &pager), "Loading...\n");

        state.is_loading = false;
        state.error = Some("Failed to fetch food items (HTTP 500)".into());
        let out = state_view(&state, &pager);
        assert!(out.starts_with("error: Failed to fetch food items (HTTP 500)\n"));
        assert!(out.ends_with("No food items found.\n"));
    }
}
