//! User-facing texts.

use crate::session::BoundPair;

pub const HELP: &str = "Напиши \"Привет\" или \"/hello_world\"";
pub const NOT_UNDERSTOOD: &str = "Я тебя не понимаю. Напиши /help.";
pub const FAILURE: &str = "Произошел сбой ...";
pub const HELLO_HINT: &str = "Напиши /hello_world.";

pub const CHEAPEST_STARTED: &str = "Поиск самых дешевых отелей ...";
pub const MOST_EXPENSIVE_STARTED: &str = "Поиск самых дорогих отелей ...";
pub const BEST_DEAL_STARTED: &str = "Поиск самых лучших (близко и дешево) отелей ...";

pub const CITY_PROMPT: &str = "Введите название искомого города \n(на русском или английском): ";
pub const CITY_CHOICE: &str = "Обнаружены следующие города:";
pub const NO_CITIES: &str = "Городов с указанным названием не обнаружено. Попробуйте еще раз.";
pub const LOOKUP_FAILED: &str = "Сбой в получении данных с сервера.";
pub const WRONG_CITY: &str = "Ошибка! Выбирайте город только из таблицы выше!";

pub const MIN_PRICE_PROMPT: &str = "Укажите минимальную стоимость, руб";
pub const MAX_PRICE_PROMPT: &str = "Укажите максимальную стоимость, руб: ";
pub const MIN_DISTANCE_PROMPT: &str = "Укажите минимальную дальность от центра города, км.: ";
pub const MAX_DISTANCE_PROMPT: &str = "Укажите максимальную дальность от центра города, км.: ";
pub const NOT_A_NUMBER: &str = "Вводить можно только числа. Попробуйте еще раз.";

pub const SWAP_OPTION: &str = "Поменять местами максимальное и минимальное значение.";
pub const REWRITE_OPTION: &str = "Попробовать ввести все значения заново.";

pub const LIMIT_PROMPT: &str = "Сколько гостиниц (не более 25) вывести на экран?";
pub const LIMIT_TOO_LARGE: &str = "Вы ввели число больше 25. Попробуйте еще раз.";
pub const LIMIT_TOO_SMALL: &str = "Нужно вывести хотя бы одну гостиницу. Попробуйте еще раз.";
pub const LIMIT_NOT_INTEGER: &str = "Вводить можно только числа (целые). Попробуйте еще раз.";

pub const SEARCH_STARTED: &str = "Начинаю поиск. Это может занять продолжительное время";
pub const NO_RESULTS: &str = "Для заданных параметров ничего не найдено. Попробуйте еще раз.";

pub fn greeting(first_name: &str) -> String {
    format!(
        "Привет, {}! Это EasyTravelBot, чем я могу тебе помочь?\n\
         Команды:\n\
         /lowprice - для поиска самых дешевых отелей.\n\
         /highprice - для поиска самых дорогих отелей.\n\
         /bestdeal - для поиска самых лучших (близко и дешево) отелей.",
        first_name
    )
}

pub fn chosen(label: &str) -> String {
    format!("Вы выбрали: {}", label)
}

pub fn results_for(city: &str) -> String {
    format!("Результаты для города: {}", city)
}

pub fn conflict(pair: BoundPair) -> &'static str {
    match pair {
        BoundPair::Price => {
            "Вы ввели максимальную сумму меньше (или равную) минимальной.\nЧто желаете сделать?"
        }
        BoundPair::Distance => {
            "Вы ввели максимальную дистанцию меньше (или равную) минимальной.\nЧто желаете сделать?"
        }
    }
}

pub fn swapped(min: f64, max: f64) -> String {
    format!("Минимальное значение {} \nМаксимальное значение {} ", min, max)
}

pub fn hotel(name: &str, rendered: &str) -> String {
    format!("Гостиница: {}\n{}", name, rendered)
}

pub fn short_count(found: usize) -> String {
    format!("Заданным параметрам поиска соответствует лишь {} гостиниц", found)
}
