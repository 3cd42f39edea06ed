pub mod patch_card;
