pub mod combatant;
pub mod damage;
pub mod policy;
