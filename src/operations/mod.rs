pub mod joint;
