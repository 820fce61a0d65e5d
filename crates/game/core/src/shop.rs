//! The town shopkeeper: fixed stock bought at an item's gold value and sold
//! back at half of it.

use std::fmt;

use crate::grid::Position;
use crate::inventory::Equipment;
use crate::items::Item;
use crate::warrior::Warrior;

/// Greatest Manhattan distance from which the warrior can trade.
pub const SHOP_REACH: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShopItem {
    pub item: Item,
    pub quantity: u32,
    /// Never runs out; `quantity` is ignored.
    pub infinite: bool,
}

impl ShopItem {
    pub fn new(item: Item, quantity: u32) -> Self {
        Self {
            item,
            quantity,
            infinite: false,
        }
    }

    pub fn unlimited(item: Item) -> Self {
        Self {
            item,
            quantity: 0,
            infinite: true,
        }
    }

    pub fn price(&self) -> u32 {
        self.item.gold_value
    }

    pub fn is_available(&self) -> bool {
        self.infinite || self.quantity > 0
    }
}

/// Result of a buy or sell attempt. Refusals leave gold, stock and backpack
/// untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Trade {
    Bought { item: Item, price: u32 },
    Sold { item: Item, price: u32 },
    NotEnoughGold,
    OutOfStock,
    InventoryFull,
    Unsellable,
    /// The stock or backpack index holds nothing.
    NoSuchItem,
    /// The warrior is not standing next to the shop.
    OutOfReach,
}

impl Trade {
    pub fn is_success(&self) -> bool {
        matches!(self, Trade::Bought { .. } | Trade::Sold { .. })
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trade::Bought { item, price } => {
                write!(f, "Purchased {} for {} gold!", item.name, price)
            }
            Trade::Sold { item, price } => write!(f, "Sold {} for {} gold!", item.name, price),
            Trade::NotEnoughGold => f.write_str("Not enough gold!"),
            Trade::OutOfStock => f.write_str("Item out of stock!"),
            Trade::InventoryFull => f.write_str("Inventory is full!"),
            Trade::Unsellable => f.write_str("This item cannot be sold!"),
            Trade::NoSuchItem => f.write_str("There is nothing there to trade."),
            Trade::OutOfReach => f.write_str("You need to stand next to the shop."),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shop {
    position: Position,
    stock: Vec<ShopItem>,
}

impl Shop {
    pub fn new(position: Position, stock: Vec<ShopItem>) -> Self {
        Self { position, stock }
    }

    /// Potions without limit plus a few swords and suits of armor.
    pub fn standard(position: Position) -> Self {
        let stock = vec![
            ShopItem::unlimited(Item::health_potion().with_gold_value(25)),
            ShopItem::new(
                Item::weapon("Iron Sword", "A sturdy iron sword", 5).with_gold_value(50),
                3,
            ),
            ShopItem::new(
                Item::weapon("Steel Sword", "A well-crafted steel sword", 8).with_gold_value(100),
                2,
            ),
            ShopItem::new(
                Item::armor("Leather Armor", "Basic leather protection", 3).with_gold_value(40),
                3,
            ),
            ShopItem::new(
                Item::armor("Chainmail", "Strong chainmail armor", 5).with_gold_value(80),
                2,
            ),
        ];
        Self::new(position, stock)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn stock(&self) -> &[ShopItem] {
        &self.stock
    }

    pub fn is_within_reach(&self, from: Position) -> bool {
        from.manhattan_distance(self.position) <= SHOP_REACH
    }

    /// Buys one of the stock entry at `index`. Gold is checked before stock,
    /// stock before backpack room.
    pub fn buy(&mut self, index: usize, warrior: &mut Warrior) -> Trade {
        let Some(entry) = self.stock.get_mut(index) else {
            return Trade::NoSuchItem;
        };
        let price = entry.price();
        if warrior.gold() < price {
            return Trade::NotEnoughGold;
        }
        if !entry.is_available() {
            return Trade::OutOfStock;
        }
        if warrior.inventory_mut().add_item(entry.item.clone()).is_err() {
            return Trade::InventoryFull;
        }

        warrior.remove_gold(price);
        if !entry.infinite {
            entry.quantity -= 1;
        }
        Trade::Bought {
            item: entry.item.clone(),
            price,
        }
    }

    /// Sells the backpack item at `index` for its sell price. The shop restocks
    /// an entry of the same name or lists the item anew.
    pub fn sell(&mut self, index: usize, warrior: &mut Warrior) -> Trade {
        let Some(item) = warrior.inventory().backpack_slots.get(index).cloned().flatten() else {
            return Trade::NoSuchItem;
        };
        if item.sell_price() == 0 {
            return Trade::Unsellable;
        }
        if warrior.inventory_mut().remove_from_backpack(index).is_none() {
            return Trade::NoSuchItem;
        }

        let price = item.sell_price();
        warrior.add_gold(price);
        match self.stock.iter_mut().find(|entry| entry.item.name == item.name) {
            Some(entry) if !entry.infinite => entry.quantity += 1,
            Some(_) => {}
            None => self.stock.push(ShopItem::new(item.clone(), 1)),
        }
        Trade::Sold { item, price }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::inventory::BACKPACK_CAPACITY;

    fn shop() -> Shop {
        Shop::standard(Position::new(5, 5))
    }

    fn warrior_with_gold(gold: u32) -> Warrior {
        let mut warrior = Warrior::new(Position::new(5, 6), &GameConfig::default());
        warrior.add_gold(gold);
        warrior
    }

    #[test]
    fn buying_spends_gold_and_stock() {
        let mut shop = shop();
        let mut warrior = warrior_with_gold(120);

        let trade = shop.buy(1, &mut warrior);
        assert_eq!(trade.to_string(), "Purchased Iron Sword for 50 gold!");
        assert_eq!(warrior.gold(), 70);
        assert_eq!(shop.stock()[1].quantity, 2);
        // Auto-equipped into the empty weapon slot.
        assert_eq!(warrior.effective_attack_damage(), 20);

        assert_eq!(shop.buy(0, &mut warrior).to_string(), "Purchased Health Potion for 25 gold!");
        assert!(shop.stock()[0].is_available());
        assert_eq!(warrior.health_potion_count(), 1);
    }

    #[test]
    fn refusals_leave_everything_untouched() {
        let mut shop = shop();
        let mut poor = warrior_with_gold(10);
        assert_eq!(shop.buy(2, &mut poor), Trade::NotEnoughGold);
        assert_eq!(poor.gold(), 10);
        assert_eq!(shop.buy(99, &mut poor), Trade::NoSuchItem);

        let mut rich = warrior_with_gold(1_000);
        assert!(shop.buy(4, &mut rich).is_success());
        assert!(shop.buy(4, &mut rich).is_success());
        assert_eq!(shop.buy(4, &mut rich), Trade::OutOfStock);
        assert_eq!(rich.gold(), 840);
    }

    #[test]
    fn full_backpack_refuses_purchase() {
        let mut shop = shop();
        let mut warrior = warrior_with_gold(100);
        for i in 0..BACKPACK_CAPACITY {
            warrior
                .inventory_mut()
                .stash(Item::misc(format!("Pebble {i}"), "A pebble"))
                .unwrap();
        }
        assert_eq!(shop.buy(0, &mut warrior), Trade::InventoryFull);
        assert_eq!(shop.buy(0, &mut warrior).to_string(), "Inventory is full!");
        assert_eq!(warrior.gold(), 100);
    }

    #[test]
    fn selling_pays_half_and_restocks() {
        let mut shop = shop();
        let mut warrior = warrior_with_gold(0);
        warrior
            .inventory_mut()
            .stash(Item::weapon("Iron Sword", "A sturdy iron sword", 5).with_gold_value(50))
            .unwrap();
        warrior
            .inventory_mut()
            .stash(Item::misc("Ancient Key", "Opens something").with_gold_value(50))
            .unwrap();

        assert_eq!(shop.sell(0, &mut warrior).to_string(), "Sold Iron Sword for 25 gold!");
        assert_eq!(warrior.gold(), 25);
        assert_eq!(shop.stock()[1].quantity, 4);

        assert!(shop.sell(1, &mut warrior).is_success());
        let listed = shop.stock().last().unwrap();
        assert_eq!((listed.item.name.as_str(), listed.quantity), ("Ancient Key", 1));
        assert_eq!(shop.sell(1, &mut warrior), Trade::NoSuchItem);
    }

    #[test]
    fn worthless_items_cannot_be_sold() {
        let mut shop = shop();
        let mut warrior = warrior_with_gold(0);
        warrior
            .inventory_mut()
            .stash(Item::misc("Pebble", "A pebble").with_gold_value(1))
            .unwrap();
        assert_eq!(shop.sell(0, &mut warrior), Trade::Unsellable);
        assert_eq!(warrior.inventory().backpack().count(), 1);
    }

    #[test]
    fn reach_is_one_tile() {
        let shop = shop();
        assert!(shop.is_within_reach(Position::new(5, 6)));
        assert!(shop.is_within_reach(Position::new(5, 5)));
        assert!(!shop.is_within_reach(Position::new(6, 6)));
    }
}
