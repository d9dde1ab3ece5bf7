pub mod yandex_art;
