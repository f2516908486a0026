//! roster.rs：戰場上所有存活單位，依加入順序保存
//!
//! 加入順序即 AI 的「名冊順序」，同分決勝都依此順序。
use crate::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    units: Vec<UnitInstance>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入單位，ID 重複或位置已被佔據時拒絕
    pub fn insert(&mut self, unit: UnitInstance) -> Result<(), Error> {
        let func = "Roster::insert";
        if self.get(&unit.id).is_some() {
            return Err(Error::DuplicateUnit {
                func,
                unit_id: unit.id,
            });
        }
        if self.is_occupied(unit.pos) {
            return Err(Error::PosOccupied {
                func,
                pos: unit.pos,
            });
        }
        self.units.push(unit);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UnitInstance> {
        self.units.iter()
    }

    pub fn get(&self, unit_id: &str) -> Option<&UnitInstance> {
        self.units.iter().find(|u| u.id == unit_id)
    }

    pub fn get_mut(&mut self, unit_id: &str) -> Option<&mut UnitInstance> {
        self.units.iter_mut().find(|u| u.id == unit_id)
    }

    pub fn unit_at(&self, pos: Position) -> Option<&UnitInstance> {
        self.units.iter().find(|u| u.pos == pos)
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.unit_at(pos).is_some()
    }

    pub fn side_units(&self, side: Side) -> impl Iterator<Item = &UnitInstance> {
        self.units.iter().filter(move |u| u.side == side)
    }

    pub fn side_count(&self, side: Side) -> usize {
        self.side_units(side).count()
    }

    pub fn hero(&self, side: Side) -> Option<&UnitInstance> {
        self.side_units(side).find(|u| u.is_hero())
    }

    pub fn side_units_mut(&mut self, side: Side) -> impl Iterator<Item = &mut UnitInstance> {
        self.units.iter_mut().filter(move |u| u.side == side)
    }

    /// 移除單位並回傳；其餘單位保持原本順序
    pub fn remove(&mut self, unit_id: &str) -> Option<UnitInstance> {
        let index = self.units.iter().position(|u| u.id == unit_id)?;
        Some(self.units.remove(index))
    }

    /// 直接改變位置，只檢查目標格是否空著
    pub fn relocate(&mut self, unit_id: &str, to: Position) -> Result<(), Error> {
        let func = "Roster::relocate";
        if let Some(other) = self.unit_at(to) {
            if other.id != unit_id {
                return Err(Error::PosOccupied { func, pos: to });
            }
        }
        let unit = self.get_mut(unit_id).ok_or_else(|| Error::UnitNotFound {
            func,
            unit_id: unit_id.to_string(),
        })?;
        unit.pos = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(name: &str, role: Role) -> UnitDefinition {
        UnitDefinition {
            name: name.to_string(),
            role,
            sprite: None,
            placeholder: None,
            max_hp: 10,
            atk: 3,
            min_range: 1,
            max_range: 1,
            movement: 3,
            heal: None,
        }
    }

    fn sample() -> Roster {
        let mut roster = Roster::new();
        for (id, side, x, role) in [
            ("P1-H", Side::Blue, 0, Role::Hero),
            ("P1-1", Side::Blue, 1, Role::Soldier),
            ("P2-H", Side::Red, 5, Role::Hero),
            ("P2-1", Side::Red, 4, Role::Soldier),
        ] {
            roster
                .insert(UnitInstance::new(id, side, Position::new(x, 0), def(id, role)))
                .unwrap();
        }
        roster
    }

    #[test]
    fn test_insert_rejects_conflicts() {
        let mut roster = sample();
        let taken = UnitInstance::new("X", Side::Red, Position::new(1, 0), def("X", Role::Soldier));
        assert!(matches!(roster.insert(taken), Err(Error::PosOccupied { .. })));
        let dup = UnitInstance::new("P1-1", Side::Red, Position::new(7, 7), def("X", Role::Soldier));
        assert!(matches!(roster.insert(dup), Err(Error::DuplicateUnit { .. })));
        assert_eq!(roster.len(), 4);
    }

    #[test]
    fn test_lookup_and_heroes() {
        let roster = sample();
        assert_eq!(roster.unit_at(Position::new(4, 0)).unwrap().id, "P2-1");
        assert!(roster.unit_at(Position::new(2, 0)).is_none());
        assert_eq!(roster.hero(Side::Blue).unwrap().id, "P1-H");
        assert_eq!(roster.hero(Side::Red).unwrap().id, "P2-H");
        assert_eq!(roster.side_count(Side::Red), 2);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut roster = sample();
        let removed = roster.remove("P1-1").unwrap();
        assert_eq!(removed.id, "P1-1");
        let ids: Vec<_> = roster.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ["P1-H", "P2-H", "P2-1"]);
        assert!(roster.remove("P1-1").is_none());
        assert!(!roster.is_occupied(Position::new(1, 0)));
    }

    #[test]
    fn test_relocate() {
        let mut roster = sample();
        roster.relocate("P1-1", Position::new(2, 0)).unwrap();
        assert_eq!(roster.get("P1-1").unwrap().pos, Position::new(2, 0));
        assert!(roster.relocate("P1-1", Position::new(0, 0)).is_err());
        assert!(roster.relocate("nobody", Position::new(3, 3)).is_err());
    }
}
